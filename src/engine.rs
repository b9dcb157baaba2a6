//! gridMET extraction engine: downloads the requested window for each
//! variable, maps it onto HRU polygons with the area weights, and writes a
//! netCDF file plus a JSON run sidecar.
use std::path::Path;
use std::time::Duration;

use chrono::{Local, NaiveDate, Utc};
use ndarray::{Array1, Array2};
use tracing::{debug, info, warn};

use crate::core::engine::{Engine, EngineError};
use crate::core::request::ExtractionRequest;
use crate::core::weights::WeightsTable;
use crate::io::gridmet::{GridMetClient, SubsetQuery, download_path};
use crate::io::grid::GridReader;
use crate::io::shapefile::{HruSet, read_hrus};
use crate::io::writers::climate_netcdf::write_climate_netcdf;
use crate::io::writers::metadata::{
    OutputStatus, RunSummary, effective_end, sidecar_path, write_run_sidecar,
};
use crate::types::Variable;

const KELVIN_TO_CELSIUS: f64 = -273.15;
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// State gathered by `initialize`
struct Prepared {
    request: ExtractionRequest,
    weights: WeightsTable,
    hrus: HruSet,
    grids: Vec<(Variable, GridReader)>,
    start: NaiveDate,
    end: NaiveDate,
    days: u32,
}

pub struct GridMetEngine {
    client: GridMetClient,
    today: NaiveDate,
    prepared: Option<Prepared>,
    output: OutputStatus,
    finalized: bool,
}

impl GridMetEngine {
    pub fn new() -> Result<Self, EngineError> {
        Ok(Self {
            client: GridMetClient::new(DOWNLOAD_TIMEOUT)?,
            today: Local::now().date_naive(),
            prepared: None,
            output: OutputStatus::Skipped,
            finalized: false,
        })
    }

    /// Pin the date day-count windows and file names are computed from
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn prepared_mut(&mut self, phase: &'static str) -> Result<&mut Prepared, EngineError> {
        self.prepared
            .as_mut()
            .ok_or(EngineError::NotInitialized { phase })
    }
}

fn require(kind: &'static str, path: &Path, ok: bool) -> Result<(), EngineError> {
    if ok {
        debug!("{} exists: {:?}", kind, path);
        Ok(())
    } else {
        Err(EngineError::MissingPath {
            kind,
            path: path.to_path_buf(),
        })
    }
}

impl Engine for GridMetEngine {
    fn initialize(&mut self, request: &ExtractionRequest) -> Result<bool, EngineError> {
        require("input path", &request.input_path, request.input_path.is_dir())?;
        require("output path", &request.output_path, request.output_path.is_dir())?;
        require("weights file", &request.weights_file, request.weights_file.is_file())?;

        let weights = WeightsTable::from_path(&request.weights_file)?;
        info!(
            "Read weights for {} HRUs keyed by {}",
            weights.len(),
            weights.id_field()
        );
        let hrus = read_hrus(&request.input_path, weights.id_field())?;

        let (start, end) = request.window.date_bounds(self.today);
        let expected = request.window.expected_days();
        info!(
            "Requesting {} days: {} to {}",
            expected,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let mut grids = Vec::with_capacity(request.variables.len());
        for &var in &request.variables {
            let query = SubsetQuery::new(var, start, end);
            let dest = download_path(&request.input_path, &request.file_prefix, var, self.today);
            self.client.download(&query, &dest)?;
            let reader = GridReader::open(&dest)?;
            info!("gridMET variable {} retrieved: {:?}", var, dest);
            grids.push((var, reader));
        }

        let ready = grids
            .iter()
            .all(|(_, g)| g.shape.days == expected as usize);
        if let Some((_, first)) = grids.first() {
            info!(
                "gridMET returned days = {} and expected number of days {}",
                first.shape.days, expected
            );
        }
        if !ready {
            warn!("Returned and expected days not equal");
        }

        self.prepared = Some(Prepared {
            request: request.clone(),
            weights,
            hrus,
            grids,
            start,
            end,
            days: expected,
        });
        self.output = OutputStatus::Skipped;
        self.finalized = false;
        Ok(ready)
    }

    fn set_day_count(&mut self, days: u32) {
        match self.prepared.as_mut() {
            Some(prepared) => prepared.days = days,
            None => warn!("Day count {} set before initialize; ignored", days),
        }
    }

    fn compute_and_write(&mut self) -> Result<(), EngineError> {
        let today = self.today;
        let prepared = self.prepared_mut("compute_and_write")?;
        let available = prepared
            .grids
            .iter()
            .map(|(_, g)| g.shape.days)
            .min()
            .unwrap_or(0);
        let days = (prepared.days as usize).min(available);
        let hru_count = prepared.hrus.len();

        let mut series = Vec::with_capacity(prepared.grids.len());
        for (var, reader) in &prepared.grids {
            let offset = if var.is_temperature() { KELVIN_TO_CELSIUS } else { 0.0 };
            let mut values = Array2::<f64>::zeros((days, hru_count));
            for day in 0..days {
                debug!("Processing {} day {}", var, day);
                let grid = reader.read_day(day)?;
                let cells = grid
                    .as_slice()
                    .ok_or_else(|| EngineError::Grid("grid is not contiguous".into()))?;
                let row = prepared.weights.zonal_means(&prepared.hrus.ids, cells, offset)?;
                values.row_mut(day).assign(&Array1::from(row));
            }
            info!("Mapped {} over {} days", var, days);
            series.push((*var, values));
        }

        let request = &prepared.request;
        let path = request.output_path.join(format!(
            "{}climate_{}.nc",
            request.file_prefix,
            today.format("%Y_%m_%d")
        ));
        write_climate_netcdf(&path, &prepared.hrus, prepared.start, &series)?;
        self.output = OutputStatus::Written { netcdf: path };
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), EngineError> {
        if self.finalized {
            return Ok(());
        }
        self.finalized = true;

        // dropping the readers closes the GDAL datasets
        let Some(prepared) = self.prepared.take() else {
            return Ok(());
        };
        let request = prepared.request;
        let summary = RunSummary {
            effective_days: prepared.days,
            window_start: prepared.start,
            window_end: prepared.end,
            effective_end: effective_end(prepared.start, prepared.days),
            output: self.output.clone(),
            created: Utc::now(),
            request,
        };
        let path = sidecar_path(&summary.request.output_path, &summary.request.file_prefix, self.today);
        write_run_sidecar(&path, &summary)
    }
}
