//! Process exit codes

/// Successful termination, including a graceful day-count fallback
pub const OK: i32 = 0;

/// Upstream data not available for the requested window
pub const NOT_READY: i32 = 1;

/// Command line usage error (same code clap uses)
pub const USAGE: i32 = 2;

/// Extraction engine failure
pub const SOFTWARE: i32 = 70;
