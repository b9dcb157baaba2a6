use std::path::{Path, PathBuf};

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::engine::EngineError;
use crate::core::request::ExtractionRequest;

/// Whether the run produced climate output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutputStatus {
    Written { netcdf: PathBuf },
    /// gridMET was not ready; nothing was computed
    Skipped,
}

/// JSON sidecar describing one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub request: ExtractionRequest,
    /// Day count after any fallback
    pub effective_days: u32,
    /// Bounds of the window as requested, before any fallback
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    /// Last day covered by `effective_days`; `None` when no day is left
    pub effective_end: Option<NaiveDate>,
    #[serde(flatten)]
    pub output: OutputStatus,
    pub created: DateTime<Utc>,
}

/// Last day of a `days`-long window starting at `start`
pub fn effective_end(start: NaiveDate, days: u32) -> Option<NaiveDate> {
    let span = days.checked_sub(1)?;
    start.checked_add_days(Days::new(u64::from(span)))
}

/// Sidecar path for a run: `<outpath>/<prefix>climate_<YYYY_MM_DD>.json`
pub fn sidecar_path(output_dir: &Path, prefix: &str, today: NaiveDate) -> PathBuf {
    output_dir.join(format!("{}climate_{}.json", prefix, today.format("%Y_%m_%d")))
}

/// Write `summary` as pretty JSON
pub fn write_run_sidecar(path: &Path, summary: &RunSummary) -> Result<(), EngineError> {
    let json_string = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json_string)?;
    info!("Created run metadata sidecar: {:?}", path);
    Ok(())
}
