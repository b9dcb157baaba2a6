//! The extraction engine capability driven by the run orchestrator.
use std::path::PathBuf;

use thiserror::Error;

use crate::core::request::ExtractionRequest;

/// Failures raised by an extraction engine during any lifecycle phase
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{kind} does not exist: {}", path.display())]
    MissingPath { kind: &'static str, path: PathBuf },

    #[error("Weights file {}: {reason}", path.display())]
    Weights { path: PathBuf, reason: String },

    #[error("No shapefiles (*.shp) found in {}", path.display())]
    NoShapefiles { path: PathBuf },

    #[error("{phase} called before initialize")]
    NotInitialized { phase: &'static str },

    #[error("Grid error: {0}")]
    Grid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "gridmet")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "gridmet")]
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[cfg(feature = "gridmet")]
    #[error("netCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),
}

/// Lifecycle of an extraction engine: initialize, then either compute or not,
/// then finalize once.
pub trait Engine {
    /// Validate inputs and fetch the requested window. Returns `false` when the
    /// upstream source does not yet hold every requested day.
    fn initialize(&mut self, request: &ExtractionRequest) -> Result<bool, EngineError>;

    /// Revise the pending window size before a later phase
    fn set_day_count(&mut self, days: u32);

    /// Weighted extraction over the initialized window, writing output files
    fn compute_and_write(&mut self) -> Result<(), EngineError>;

    /// Release resources at the end of a run
    fn finalize(&mut self) -> Result<(), EngineError>;
}
