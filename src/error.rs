//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Wraps argument validation (`ConfigError`) and engine failures (`EngineError`),
//! and provides the readiness failure that ends a run without a fallback.
use thiserror::Error;

use crate::core::engine::EngineError;
use crate::core::request::ConfigError;
use crate::exitcode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid extraction arguments: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("gridMET did not return the period requested ({window}); data not updated")]
    NotReady { window: String },
}

impl Error {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => exitcode::USAGE,
            Error::NotReady { .. } => exitcode::NOT_READY,
            Error::Engine(_) => exitcode::SOFTWARE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_failure_has_its_own_exit_code() {
        let codes = [
            Error::Config(ConfigError::BothSpecified).exit_code(),
            Error::NotReady { window: "last 3 days".into() }.exit_code(),
            Error::Engine(EngineError::Grid("bad band".into())).exit_code(),
        ];
        assert_eq!(codes, [exitcode::USAGE, exitcode::NOT_READY, exitcode::SOFTWARE]);
    }
}
