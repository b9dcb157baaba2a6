//! Output writers: the climate netCDF file and the JSON run sidecar.
pub mod metadata;

#[cfg(feature = "gridmet")]
pub mod climate_netcdf;
