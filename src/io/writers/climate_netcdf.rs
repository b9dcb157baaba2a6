//! CF-1.8 timeSeries netCDF output: one `(time, hruid)` variable per extracted
//! climate variable, plus HRU ids and centroid coordinates.
use std::path::Path;

use chrono::NaiveDate;
use ndarray::Array2;
use tracing::info;

use crate::core::engine::EngineError;
use crate::core::weights::FILL_VALUE;
use crate::io::shapefile::HruSet;
use crate::types::Variable;

/// Write the mapped values. Each array in `series` has shape (days, hrus).
pub fn write_climate_netcdf(
    path: &Path,
    hrus: &HruSet,
    start: NaiveDate,
    series: &[(Variable, Array2<f64>)],
) -> Result<(), EngineError> {
    let days = series.first().map(|(_, a)| a.nrows()).unwrap_or(0);
    for (var, values) in series {
        if values.dim() != (days, hrus.len()) {
            return Err(EngineError::Grid(format!(
                "{} has shape {:?}, expected ({}, {})",
                var,
                values.dim(),
                days,
                hrus.len()
            )));
        }
    }

    let mut file = netcdf::create(path)?;
    file.add_attribute("Conventions", "CF-1.8")?;
    file.add_attribute("featureType", "timeSeries")?;
    file.add_attribute("history", "")?;

    file.add_dimension("hruid", hrus.len())?;
    file.add_dimension("time", days)?;

    {
        let mut time = file.add_variable::<f32>("time", &["time"])?;
        time.put_attribute("long_name", "time")?;
        time.put_attribute("standard_name", "time")?;
        let units = format!("days since {}", start.format("%Y-%m-%d"));
        time.put_attribute("units", units.as_str())?;
        time.put_attribute("calendar", "standard")?;
        let offsets: Vec<f32> = (0..days).map(|d| d as f32).collect();
        time.put_values(&offsets, ..)?;
    }

    {
        let ids = hrus
            .ids
            .iter()
            .map(|&id| {
                i32::try_from(id)
                    .map_err(|_| EngineError::Grid(format!("HRU id {} does not fit in int32", id)))
            })
            .collect::<Result<Vec<i32>, _>>()?;
        let mut hru = file.add_variable::<i32>("hruid", &["hruid"])?;
        hru.put_attribute("cf_role", "timeseries_id")?;
        hru.put_attribute("long_name", "local model hru id")?;
        hru.put_values(&ids, ..)?;
    }

    for (name, long_name, units, standard_name, values) in [
        ("hru_lat", "Latitude of HRU centroid", "degrees_north", "hru_latitude", &hrus.lat),
        ("hru_lon", "Longitude of HRU centroid", "degrees_east", "hru_longitude", &hrus.lon),
    ] {
        let mut var = file.add_variable::<f32>(name, &["hruid"])?;
        var.put_attribute("long_name", long_name)?;
        var.put_attribute("units", units)?;
        var.put_attribute("standard_name", standard_name)?;
        let values: Vec<f32> = values.iter().map(|&v| v as f32).collect();
        var.put_values(&values, ..)?;
    }

    for (variable, values) in series {
        let meta = variable.output_meta();
        let mut var = file.add_variable::<f32>(meta.name, &["time", "hruid"])?;
        var.put_attribute("long_name", meta.long_name)?;
        var.put_attribute("units", meta.units)?;
        var.put_attribute("standard_name", meta.standard_name)?;
        var.put_attribute("fill_value", FILL_VALUE)?;
        let flat: Vec<f32> = values.iter().map(|&v| v as f32).collect();
        var.put_values(&flat, ..)?;
    }

    info!("Wrote {} days for {} HRUs to {:?}", days, hrus.len(), path);
    Ok(())
}
