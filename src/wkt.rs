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

//! Well-known-text export.
//!
//! One geometry literal per line, in collection order. WKT carries no
//! properties, so names, ids and derived metadata are intentionally dropped;
//! this export path is lossy and WKT is not accepted for import.

use geojson::Value;
use log::warn;

use crate::record::AoiRecord;

/// Serialize each record's geometry as a WKT literal, one per line.
///
/// Records whose geometry has no WKT rendering here (anything that is not a
/// Polygon or MultiPolygon) are skipped with a warning.
pub fn encode(records: &[AoiRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        match geometry_literal(&record.geometry.value) {
            Some(literal) => lines.push(literal),
            None => warn!(
                "skipping AOI {} in WKT export: unsupported geometry type {}",
                record.id,
                type_name(&record.geometry.value)
            ),
        }
    }
    lines.join("\n")
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(..) => "Point",
        Value::MultiPoint(..) => "MultiPoint",
        Value::LineString(..) => "LineString",
        Value::MultiLineString(..) => "MultiLineString",
        Value::Polygon(..) => "Polygon",
        Value::MultiPolygon(..) => "MultiPolygon",
        Value::GeometryCollection(..) => "GeometryCollection",
    }
}

fn geometry_literal(value: &Value) -> Option<String> {
    match value {
        Value::Polygon(rings) => Some(format!("POLYGON {}", rings_literal(rings))),
        Value::MultiPolygon(polygons) => {
            let body: Vec<String> = polygons.iter().map(|rings| rings_literal(rings)).collect();
            Some(format!("MULTIPOLYGON ({})", body.join(", ")))
        }
        _ => None,
    }
}

/// `((x y, x y, ...), (x y, ...))` — outer ring first, then any holes.
fn rings_literal(rings: &[Vec<Vec<f64>>]) -> String {
    let body: Vec<String> = rings
        .iter()
        .map(|ring| {
            let positions: Vec<String> = ring
                .iter()
                .map(|position| {
                    let lon = position.first().copied().unwrap_or(0.0);
                    let lat = position.get(1).copied().unwrap_or(0.0);
                    format!("{} {}", lon, lat)
                })
                .collect();
            format!("({})", positions.join(", "))
        })
        .collect();
    format!("({})", body.join(", "))
}

#[cfg(test)]
mod tests {
    use super::encode;
    use crate::record::AoiRecord;
    use geojson::{Geometry, Value};

    fn record(value: Value) -> AoiRecord {
        AoiRecord::new(Geometry::new(value), "AOI".to_owned())
    }

    #[test]
    fn polygon_one_literal_per_line() {
        let ring = vec![
            vec![30.0, 10.0],
            vec![40.0, 40.0],
            vec![20.0, 40.0],
            vec![30.0, 10.0],
        ];
        let records = vec![
            record(Value::Polygon(vec![ring.clone()])),
            record(Value::Polygon(vec![ring])),
        ];

        let text = encode(&records);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "POLYGON ((30 10, 40 40, 20 40, 30 10))"
        );
        assert_eq!(lines[0], lines[1]);
    }

    #[test]
    fn polygon_with_hole_keeps_both_rings() {
        let outer = vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![10.0, 10.0],
            vec![0.0, 0.0],
        ];
        let hole = vec![
            vec![2.0, 1.0],
            vec![3.0, 1.0],
            vec![3.0, 2.0],
            vec![2.0, 1.0],
        ];
        let text = encode(&[record(Value::Polygon(vec![outer, hole]))]);
        assert_eq!(
            text,
            "POLYGON ((0 0, 10 0, 10 10, 0 0), (2 1, 3 1, 3 2, 2 1))"
        );
    }

    #[test]
    fn multipolygon_literal() {
        let ring = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ];
        let text = encode(&[record(Value::MultiPolygon(vec![
            vec![ring.clone()],
            vec![ring],
        ]))]);
        assert_eq!(
            text,
            "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)), ((0 0, 1 0, 1 1, 0 0)))"
        );
    }

    #[test]
    fn unsupported_geometry_is_skipped() {
        let ring = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ];
        let records = vec![
            record(Value::Point(vec![1.0, 2.0])),
            record(Value::Polygon(vec![ring])),
        ];
        let text = encode(&records);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("POLYGON"));
    }
}
