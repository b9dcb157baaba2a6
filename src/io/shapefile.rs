//! HRU polygons from the shapefiles in the input directory, read with GDAL and
//! reduced to one centroid per HRU id.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gdal::Dataset;
use gdal::vector::{Geometry, LayerAccess};
use tracing::{debug, info};

use crate::core::engine::EngineError;
use crate::core::geometry::{Polygon, centroid};

/// HRU ids in ascending order with their centroid coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HruSet {
    pub ids: Vec<i64>,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
}

impl HruSet {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// `*.shp` files in `dir`, sorted so the HRU order is stable across platforms
pub fn find_shapefiles(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_shp = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("shp"));
        if is_shp {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read every shapefile in `dir`, grouping polygons by the `id_field` attribute
pub fn read_hrus(dir: &Path, id_field: &str) -> Result<HruSet, EngineError> {
    let files = find_shapefiles(dir)?;
    if files.is_empty() {
        return Err(EngineError::NoShapefiles {
            path: dir.to_path_buf(),
        });
    }
    info!("Reading {} shapefile(s) from {:?}", files.len(), dir);

    let mut groups: BTreeMap<i64, Vec<Polygon>> = BTreeMap::new();
    for file in &files {
        debug!("Reading {:?}", file);
        let dataset = Dataset::open(file)?;
        let mut layer = dataset.layer(0)?;
        for feature in layer.features() {
            let id = match feature.field_as_integer64_by_name(id_field)? {
                Some(id) => id,
                None => match feature.field_as_double_by_name(id_field)? {
                    Some(v) => v as i64,
                    None => continue,
                },
            };
            if let Some(geometry) = feature.geometry() {
                collect_polygons(geometry, groups.entry(id).or_default());
            }
        }
    }

    let mut hrus = HruSet::default();
    for (id, polygons) in groups {
        let (x, y) = centroid(&polygons).unwrap_or((f64::NAN, f64::NAN));
        hrus.ids.push(id);
        hrus.lon.push(x);
        hrus.lat.push(y);
    }
    info!("Found {} HRUs", hrus.len());
    Ok(hrus)
}

/// Flatten polygons and multipolygons into rings. A polygon's children are
/// rings (no children of their own); a multipolygon's children are polygons.
fn collect_polygons(geometry: &Geometry, out: &mut Vec<Polygon>) {
    let count = geometry.geometry_count();
    if count == 0 {
        return;
    }
    if geometry.get_geometry(0).geometry_count() == 0 {
        let ring = |i: usize| -> Vec<(f64, f64)> {
            geometry
                .get_geometry(i)
                .get_point_vec()
                .into_iter()
                .map(|(x, y, _)| (x, y))
                .collect()
        };
        out.push(Polygon {
            exterior: ring(0),
            holes: (1..count).map(ring).collect(),
        });
    } else {
        for i in 0..count {
            collect_polygons(&geometry.get_geometry(i), out);
        }
    }
}
