#![doc = r#"
gridmet-etl — map gridded gridMET climate data onto polygons.

This crate fetches daily gridMET climate variables for a window of days and maps
them onto hydrologic response units (HRUs) with a zonal area-weighted mean, writing
one netCDF file per run. It powers the `gridmet-etl` CLI and can be embedded in
scheduled jobs of your own.

Requirements
------------
- GDAL and netCDF development headers and runtime (for the default `gridmet` feature).
- Rust 2024 edition toolchain.

Resolve a request
-----------------
User selections are validated into a single [`ExtractionRequest`]. Exactly one
window mode is active; contradictory selections fail with a [`ConfigError`].

```rust
use std::path::PathBuf;
use gridmet_etl::{ConfigError, ExtractType, ExtractionRequest, ExtractionSelection, ExtractionWindow};

let selection = ExtractionSelection {
    extract_type: Some(ExtractType::Days),
    days: Some(5),
    input_path: PathBuf::from("/data/hru"),
    output_path: PathBuf::from("/data/out"),
    weights_file: PathBuf::from("/data/weights.csv"),
    ..Default::default()
};
let request = ExtractionRequest::resolve(selection.clone()).unwrap();
assert_eq!(request.window, ExtractionWindow::ByDayCount { days: 5 });

let both = ExtractionSelection {
    period: Some((
        chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(),
    )),
    ..selection
};
assert_eq!(ExtractionRequest::resolve(both).unwrap_err(), ConfigError::BothSpecified);
```

Run an extraction
-----------------
[`run`] drives any [`Engine`] through initialize, compute and finalize. When
gridMET has not yet published the whole window, a day-count request is shortened
by one day and finalized without computing; a date-range request fails with
[`Error::NotReady`].

```rust,no_run
# #[cfg(feature = "gridmet")]
# fn main() -> gridmet_etl::Result<()> {
use gridmet_etl::{GridMetEngine, RunOutcome, run};
# let mut request: gridmet_etl::ExtractionRequest = unimplemented!();
let mut engine = GridMetEngine::new()?;
match run(&mut engine, &mut request)? {
    RunOutcome::Completed { days } => println!("extracted {days} days"),
    RunOutcome::FellBack { requested, revised } => {
        println!("gridMET not updated; next run uses {revised} days instead of {requested}")
    }
}
# Ok(())
# }
# #[cfg(not(feature = "gridmet"))]
# fn main() {}
```

Error handling
--------------
All fallible library functions return `gridmet_etl::Result<T>`; [`Error::exit_code`]
maps each failure to the process exit status used by the CLI.

Feature flags
-------------
- `gridmet` (default): the concrete gridMET engine with its GDAL, netCDF and HTTP stack.

Useful modules
--------------
- [`core`](crate::core) — request resolution, the engine trait, the orchestrator, weights.
- [`types`] — climate variables and extraction types.
- [`io`] — gridMET downloads, grid and shapefile readers, writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod core;
pub mod error;
pub mod exitcode;
pub mod io;
pub mod types;

// Concrete engine (only available with gridmet feature)
#[cfg(feature = "gridmet")]
pub mod engine;

// Curated public API surface
pub use crate::core::engine::{Engine, EngineError};
pub use crate::core::orchestrator::{RunOutcome, run};
pub use crate::core::request::{ConfigError, ExtractionRequest, ExtractionSelection};
pub use crate::core::weights::{FILL_VALUE, WeightsTable};
pub use crate::core::window::ExtractionWindow;
pub use error::{Error, Result};
pub use types::{ExtractType, Variable};

#[cfg(feature = "gridmet")]
pub use engine::GridMetEngine;
