//! gridMET THREDDS NetCDF subset service: query construction and download.
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::types::Variable;

const THREDDS_BASE: &str = "http://thredds.northwestknowledge.net:8080/thredds/ncss";

/// CONUS bounding box served by gridMET
pub const NORTH: f64 = 49.4;
pub const SOUTH: f64 = 25.0667;
pub const WEST: f64 = -124.7667;
pub const EAST: f64 = -67.0583;

/// One subset request for a single variable over a date span
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetQuery {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

impl SubsetQuery {
    pub fn new(var: Variable, start: NaiveDate, end: NaiveDate) -> Self {
        let url = format!(
            "{}/agg_met_{}_1979_CurrentYear_daily.nc",
            THREDDS_BASE,
            var.dataset_code()
        );
        let params = vec![
            ("var", var.gridmet_name().to_string()),
            ("north", NORTH.to_string()),
            ("west", WEST.to_string()),
            ("east", EAST.to_string()),
            ("south", SOUTH.to_string()),
            ("disableProjSubset", "on".to_string()),
            ("horizStride", "1".to_string()),
            ("time_start", start.format("%Y-%m-%dT00:00:00Z").to_string()),
            ("time_end", end.format("%Y-%m-%dT00:00:00Z").to_string()),
            ("timeStride", "1".to_string()),
            ("accept", "netcdf".to_string()),
        ];
        Self { url, params }
    }
}

/// Where a downloaded subset is stored: `<dir>/<prefix><var><YYYY_MM_DD>.nc`
pub fn download_path(dir: &Path, prefix: &str, var: Variable, today: NaiveDate) -> PathBuf {
    dir.join(format!("{}{}{}.nc", prefix, var.code(), today.format("%Y_%m_%d")))
}

#[cfg(feature = "gridmet")]
pub use client::GridMetClient;

#[cfg(feature = "gridmet")]
mod client {
    use std::path::Path;
    use std::time::Duration;

    use tracing::{debug, info};

    use super::SubsetQuery;
    use crate::core::engine::EngineError;

    /// Blocking HTTP client for the subset service
    pub struct GridMetClient {
        http: reqwest::blocking::Client,
    }

    impl GridMetClient {
        pub fn new(timeout: Duration) -> Result<Self, EngineError> {
            let http = reqwest::blocking::Client::builder().timeout(timeout).build()?;
            Ok(Self { http })
        }

        /// Fetch `query` and write the netCDF body to `dest`
        pub fn download(&self, query: &SubsetQuery, dest: &Path) -> Result<(), EngineError> {
            debug!("GET {} {:?}", query.url, query.params);
            let response = self
                .http
                .get(&query.url)
                .query(&query.params)
                .send()?
                .error_for_status()?;
            let body = response.bytes()?;
            std::fs::write(dest, &body)?;
            info!("Downloaded {} bytes to {:?}", body.len(), dest);
            Ok(())
        }
    }
}
