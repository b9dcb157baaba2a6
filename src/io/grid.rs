//! GDAL-backed reader for downloaded gridMET subsets. Each raster band of a
//! subset is one day; cells are returned row-major in file order, which is the
//! order the weights file's `grid_ids` index into.
use std::path::Path;

use gdal::Dataset;
use ndarray::Array2;

use crate::core::engine::EngineError;

/// Shape of a gridMET subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Width (longitude cells)
    pub size_x: usize,
    /// Height (latitude cells)
    pub size_y: usize,
    /// Number of days (raster bands)
    pub days: usize,
}

/// An open gridMET subset for one variable
pub struct GridReader {
    dataset: Dataset,
    pub shape: GridShape,
}

impl GridReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let dataset = Dataset::open(path.as_ref())?;
        let (size_x, size_y) = dataset.raster_size();
        let days = dataset.raster_count() as usize;
        if days == 0 {
            return Err(EngineError::Grid(format!(
                "no daily bands in {:?}",
                path.as_ref()
            )));
        }
        Ok(GridReader {
            dataset,
            shape: GridShape {
                size_x: size_x as usize,
                size_y: size_y as usize,
                days,
            },
        })
    }

    /// Read one day (0-based) as unpacked values of shape (height, width).
    /// Packed values are scaled, and fill values become NaN.
    pub fn read_day(&self, day: usize) -> Result<Array2<f64>, EngineError> {
        if day >= self.shape.days {
            return Err(EngineError::Grid(format!(
                "day {} out of range, subset holds {} days",
                day, self.shape.days
            )));
        }
        let band = self.dataset.rasterband(day + 1)?;
        let window = (self.shape.size_x, self.shape.size_y);
        let buf = band.read_as::<f64>((0, 0), window, window, None)?;

        let nodata = band.no_data_value();
        let scale = band.scale().unwrap_or(1.0);
        let offset = band.offset().unwrap_or(0.0);
        let data: Vec<f64> = buf
            .data()
            .iter()
            .map(|&raw| match nodata {
                Some(fill) if raw == fill => f64::NAN,
                _ => raw * scale + offset,
            })
            .collect();

        Array2::from_shape_vec((self.shape.size_y, self.shape.size_x), data).map_err(|e| {
            EngineError::Grid(format!(
                "expected {}x{} cells: {}",
                self.shape.size_x, self.shape.size_y, e
            ))
        })
    }
}
