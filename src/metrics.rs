// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Real-world measures of AOI geometries.
//!
//! Area and perimeter are computed geodesically on the WGS84 ellipsoid
//! (Karney's algorithm, via [`geo::GeodesicArea`]). Both functions are pure
//! and total: degenerate, malformed or unsupported input yields `0.0`
//! rather than an error, so callers must treat `0.0` as "unknown", not as a
//! confirmed zero measure.

use geo::GeodesicArea;
use geojson::Geometry;

/// Area of the geometry in square meters.
///
/// Returns `0.0` for anything that is not a Polygon or MultiPolygon with at
/// least 3 distinct finite outer-ring vertices per polygon.
pub fn area(geometry: &Geometry) -> f64 {
    match polygons(geometry) {
        Some(shape) => finite_or_zero(shape.geodesic_area_unsigned()),
        None => 0.0,
    }
}

/// Total boundary length of the geometry in meters, tracing every ring as a
/// line and summing geodesic segment lengths.
///
/// Same zero-on-failure contract as [`area`].
pub fn perimeter(geometry: &Geometry) -> f64 {
    match polygons(geometry) {
        Some(shape) => finite_or_zero(shape.geodesic_perimeter()),
        None => 0.0,
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Convert to a measurable polygonal shape, or `None` when the geometry is
/// unsupported or degenerate.
fn polygons(geometry: &Geometry) -> Option<geo::MultiPolygon<f64>> {
    let converted = geo::Geometry::<f64>::try_from(geometry).ok()?;
    let shape = match converted {
        geo::Geometry::Polygon(polygon) => geo::MultiPolygon(vec![polygon]),
        geo::Geometry::MultiPolygon(multi) => multi,
        _ => return None,
    };
    if shape.0.is_empty() || shape.0.iter().any(degenerate) {
        return None;
    }
    Some(shape)
}

/// A polygon with fewer than 3 distinct finite outer-ring vertices has no
/// resolvable boundary.
fn degenerate(polygon: &geo::Polygon<f64>) -> bool {
    let mut distinct: Vec<geo::Coord<f64>> = Vec::new();
    for coord in polygon.exterior().coords() {
        if !coord.x.is_finite() || !coord.y.is_finite() {
            return true;
        }
        if !distinct.contains(coord) {
            distinct.push(*coord);
        }
    }
    distinct.len() < 3
}

#[cfg(test)]
mod tests {
    use super::{area, perimeter};
    use geojson::{Geometry, Value};

    fn polygon(ring: Vec<Vec<f64>>) -> Geometry {
        Geometry::new(Value::Polygon(vec![ring]))
    }

    /// A 0.01° x 0.01° square at the equator: the meridian side is about
    /// 1105.7 m and the equatorial side about 1113.2 m on WGS84.
    fn equatorial_square() -> Geometry {
        polygon(vec![
            vec![0.0, 0.0],
            vec![0.01, 0.0],
            vec![0.01, 0.01],
            vec![0.0, 0.01],
            vec![0.0, 0.0],
        ])
    }

    #[test]
    fn area_of_known_square() {
        let a = area(&equatorial_square());
        let expected = 1.2309e6;
        assert!(
            (a / expected - 1.0).abs() < 0.01,
            "area {} not within 1% of {}",
            a,
            expected
        );
    }

    #[test]
    fn perimeter_of_known_square() {
        let p = perimeter(&equatorial_square());
        let expected = 4437.9;
        assert!(
            (p - expected).abs() < 10.0,
            "perimeter {} not within 10 m of {}",
            p,
            expected
        );
    }

    #[test]
    fn degenerate_ring_yields_zero() {
        let two_points = polygon(vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![0.0, 0.0]]);
        assert_eq!(area(&two_points), 0.0);
        assert_eq!(perimeter(&two_points), 0.0);
    }

    #[test]
    fn repeated_vertices_yield_zero() {
        let collapsed = polygon(vec![
            vec![2.0, 2.0],
            vec![2.0, 2.0],
            vec![2.0, 2.0],
            vec![2.0, 2.0],
        ]);
        assert_eq!(area(&collapsed), 0.0);
        assert_eq!(perimeter(&collapsed), 0.0);
    }

    #[test]
    fn non_finite_coordinates_yield_zero() {
        let broken = polygon(vec![
            vec![0.0, 0.0],
            vec![f64::NAN, 1.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ]);
        assert_eq!(area(&broken), 0.0);
        assert_eq!(perimeter(&broken), 0.0);
    }

    #[test]
    fn unsupported_geometry_yields_zero() {
        let point = Geometry::new(Value::Point(vec![10.0, 20.0]));
        assert_eq!(area(&point), 0.0);
        assert_eq!(perimeter(&point), 0.0);
    }

    #[test]
    fn measures_are_non_negative_for_reversed_winding() {
        // Clockwise ring; unsigned area must still be positive.
        let clockwise = polygon(vec![
            vec![0.0, 0.0],
            vec![0.0, 0.01],
            vec![0.01, 0.01],
            vec![0.01, 0.0],
            vec![0.0, 0.0],
        ]);
        assert!(area(&clockwise) > 0.0);
        assert!(perimeter(&clockwise) > 0.0);
    }
}
