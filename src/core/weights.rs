//! Area weights mapping polygons (HRUs) to flat gridMET cell indices, and the
//! weighted means computed from them.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::engine::EngineError;

/// netCDF default fill value for doubles, written for HRUs with no data
pub const FILL_VALUE: f64 = 9.969209968386869e36;

/// Grid cells and their area weights for one HRU
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HruWeights {
    pub grid_ids: Vec<usize>,
    pub weights: Vec<f64>,
}

/// Weights file contents grouped by HRU id
#[derive(Debug, Clone, PartialEq)]
pub struct WeightsTable {
    id_field: String,
    groups: BTreeMap<i64, HruWeights>,
}

impl WeightsTable {
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parse a weights CSV. The second header column names the HRU id field;
    /// `grid_ids` and `w` columns are located by name.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self, EngineError> {
        let invalid = |reason: String| EngineError::Weights {
            path: path.to_path_buf(),
            reason,
        };

        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(invalid("file is empty".into())),
        };
        let columns: Vec<&str> = header.split(',').map(|c| c.trim().trim_matches('"')).collect();
        if columns.len() < 2 {
            return Err(invalid(format!("header has {} column(s)", columns.len())));
        }
        let id_field = columns[1].to_string();
        let find = |name: &str| {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| invalid(format!("missing '{}' column", name)))
        };
        let grid_col = find("grid_ids")?;
        let w_col = find("w")?;
        let id_col = 1;

        let mut groups: BTreeMap<i64, HruWeights> = BTreeMap::new();
        for (idx, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 2;
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let field = |col: usize| {
                fields
                    .get(col)
                    .copied()
                    .ok_or_else(|| invalid(format!("line {}: missing column {}", line_no, col + 1)))
            };

            // ids are sometimes written as floats ("12.0")
            let id_raw = field(id_col)?;
            let id = id_raw
                .parse::<i64>()
                .or_else(|_| id_raw.parse::<f64>().map(|v| v as i64))
                .map_err(|_| invalid(format!("line {}: bad {} '{}'", line_no, id_field, id_raw)))?;
            let grid_raw = field(grid_col)?;
            let grid_id = grid_raw
                .parse::<usize>()
                .or_else(|_| grid_raw.parse::<f64>().map(|v| v as usize))
                .map_err(|_| invalid(format!("line {}: bad grid_ids '{}'", line_no, grid_raw)))?;
            let w_raw = field(w_col)?;
            let weight = w_raw
                .parse::<f64>()
                .map_err(|_| invalid(format!("line {}: bad w '{}'", line_no, w_raw)))?;

            let entry = groups.entry(id).or_default();
            entry.grid_ids.push(grid_id);
            entry.weights.push(weight);
        }

        Ok(Self { id_field, groups })
    }

    /// Name of the HRU id field, matching the attribute in the shapefiles
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn get(&self, hru_id: i64) -> Option<&HruWeights> {
        self.groups.get(&hru_id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Weighted value of `grid` (flattened, row-major) for each HRU in `hru_ids`.
    /// `offset` is added to every cell first (e.g. Kelvin to Celsius).
    pub fn zonal_means(
        &self,
        hru_ids: &[i64],
        grid: &[f64],
        offset: f64,
    ) -> Result<Vec<f64>, EngineError> {
        let mut out = Vec::with_capacity(hru_ids.len());
        let mut values = Vec::new();
        for &hru_id in hru_ids {
            // HRUs outside the gridMET footprint have no weights
            let Some(hru) = self.get(hru_id) else {
                out.push(FILL_VALUE);
                continue;
            };
            values.clear();
            for &cell in &hru.grid_ids {
                let v = grid.get(cell).copied().ok_or_else(|| {
                    EngineError::Grid(format!(
                        "grid id {} for HRU {} is outside a grid of {} cells",
                        cell,
                        hru_id,
                        grid.len()
                    ))
                })?;
                values.push(v + offset);
            }
            let mean = weighted_mean(&values, &hru.weights);
            out.push(if mean.is_nan() {
                masked_weighted_mean(&values, &hru.weights)
            } else {
                mean
            });
        }
        Ok(out)
    }
}

/// `sum(v * w) / sum(w)`; NaN when any value is NaN
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let (sum, wsum) = values
        .iter()
        .zip(weights)
        .fold((0.0, 0.0), |(s, ws), (&v, &w)| (s + v * w, ws + w));
    if wsum == 0.0 {
        return f64::NAN;
    }
    sum / wsum
}

/// Weighted mean over the non-NaN values only. Returns `FILL_VALUE` when
/// every value is NaN.
pub fn masked_weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let (sum, wsum) = values
        .iter()
        .zip(weights)
        .filter(|(v, _)| !v.is_nan())
        .fold((0.0, 0.0), |(s, ws), (&v, &w)| (s + v * w, ws + w));
    if wsum == 0.0 {
        return FILL_VALUE;
    }
    sum / wsum
}
