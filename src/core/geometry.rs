//! Area-weighted centroids of polygon rings, used for HRU coordinates.

/// Polygon with an exterior ring and optional holes, as (x, y) vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<(f64, f64)>,
    pub holes: Vec<Vec<(f64, f64)>>,
}

/// Absolute area and first moments (area * cx, area * cy) of a ring
fn ring_moments(ring: &[(f64, f64)]) -> (f64, f64, f64) {
    if ring.len() < 3 {
        return (0.0, 0.0, 0.0);
    }
    let mut a = 0.0;
    let mut mx = 0.0;
    let mut my = 0.0;
    for (i, &(x0, y0)) in ring.iter().enumerate() {
        let (x1, y1) = ring[(i + 1) % ring.len()];
        let cross = x0 * y1 - x1 * y0;
        a += cross;
        mx += (x0 + x1) * cross;
        my += (y0 + y1) * cross;
    }
    let area = a / 2.0;
    let (mx, my) = (mx / 6.0, my / 6.0);
    // clockwise rings give negative signed area
    if area < 0.0 {
        (-area, -mx, -my)
    } else {
        (area, mx, my)
    }
}

/// Centroid of the union of `polygons`, treated as non-overlapping. Falls back
/// to the vertex mean when the total area is zero. `None` for no vertices.
pub fn centroid(polygons: &[Polygon]) -> Option<(f64, f64)> {
    let mut area = 0.0;
    let mut mx = 0.0;
    let mut my = 0.0;
    for poly in polygons {
        let (a, x, y) = ring_moments(&poly.exterior);
        area += a;
        mx += x;
        my += y;
        for hole in &poly.holes {
            let (a, x, y) = ring_moments(hole);
            area -= a;
            mx -= x;
            my -= y;
        }
    }

    if area > 0.0 {
        return Some((mx / area, my / area));
    }

    let vertices: Vec<&(f64, f64)> = polygons.iter().flat_map(|p| p.exterior.iter()).collect();
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let (sx, sy) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &&(x, y)| (sx + x, sy + y));
    Some((sx / n, sy / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<(f64, f64)> {
        vec![
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
            (x0, y0),
        ]
    }

    fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn unit_square_centroid() {
        let poly = Polygon { exterior: square(0.0, 0.0, 1.0), holes: vec![] };
        assert!(approx(centroid(&[poly]).unwrap(), (0.5, 0.5)));
    }

    #[test]
    fn clockwise_ring_gives_same_centroid() {
        let mut ring = square(2.0, 2.0, 2.0);
        ring.reverse();
        let poly = Polygon { exterior: ring, holes: vec![] };
        assert!(approx(centroid(&[poly]).unwrap(), (3.0, 3.0)));
    }

    #[test]
    fn parts_are_weighted_by_area() {
        let small = Polygon { exterior: square(0.0, 0.0, 1.0), holes: vec![] };
        let large = Polygon { exterior: square(3.0, 0.0, 2.0), holes: vec![] };
        // areas 1 and 4, centroids x = 0.5 and 4.0
        let (x, _) = centroid(&[small, large]).unwrap();
        assert!((x - (0.5 + 4.0 * 4.0) / 5.0).abs() < 1e-9);
    }

    #[test]
    fn holes_shift_the_centroid() {
        let poly = Polygon {
            exterior: square(0.0, 0.0, 4.0),
            holes: vec![square(2.0, 0.0, 2.0)],
        };
        let (x, _) = centroid(&[poly]).unwrap();
        // remaining area 12: 16 * 2.0 - 4 * 3.0
        assert!((x - 20.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_has_no_centroid() {
        assert_eq!(centroid(&[]), None);
    }
}
