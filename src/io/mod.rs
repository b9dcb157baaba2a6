//! I/O layer: gridMET subset downloads, GDAL readers for the downloaded grids
//! and the HRU shapefiles, and `writers` for netCDF output and run sidecars.
pub mod gridmet;
pub use gridmet::{SubsetQuery, download_path};

#[cfg(feature = "gridmet")]
pub mod grid;
#[cfg(feature = "gridmet")]
pub use grid::{GridReader, GridShape};

#[cfg(feature = "gridmet")]
pub mod shapefile;
#[cfg(feature = "gridmet")]
pub use shapefile::HruSet;

pub mod writers;
