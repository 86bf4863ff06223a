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

//! KML export.
//!
//! Each record becomes one Placemark whose name is the record name. Derived
//! metadata beyond the name is not carried, so this export path is lossy and
//! KML is not accepted for import.

use geojson::Value;
use log::warn;

use crate::record::AoiRecord;

/// Serialize the record collection as a KML Document, one Placemark per
/// record in collection order.
///
/// Placemarks for geometries with no KML rendering here (anything that is
/// not a Polygon or MultiPolygon) carry the name only.
pub fn encode(records: &[AoiRecord]) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n");
    out.push_str("  <Document>\n");
    for record in records {
        out.push_str("    <Placemark>\n");
        out.push_str(&format!(
            "      <name>{}</name>\n",
            escape(&record.name)
        ));
        match &record.geometry.value {
            Value::Polygon(rings) => write_polygon(&mut out, rings, "      "),
            Value::MultiPolygon(polygons) => {
                out.push_str("      <MultiGeometry>\n");
                for rings in polygons {
                    write_polygon(&mut out, rings, "        ");
                }
                out.push_str("      </MultiGeometry>\n");
            }
            other => warn!(
                "AOI {} exported to KML without geometry: unsupported type {}",
                record.id,
                crate::wkt::type_name(other)
            ),
        }
        out.push_str("    </Placemark>\n");
    }
    out.push_str("  </Document>\n");
    out.push_str("</kml>\n");
    out
}

fn write_polygon(out: &mut String, rings: &[Vec<Vec<f64>>], indent: &str) {
    out.push_str(indent);
    out.push_str("<Polygon>\n");
    for (position, ring) in rings.iter().enumerate() {
        let boundary = if position == 0 {
            "outerBoundaryIs"
        } else {
            "innerBoundaryIs"
        };
        out.push_str(&format!("{}  <{}>\n", indent, boundary));
        out.push_str(&format!("{}    <LinearRing>\n", indent));
        out.push_str(&format!(
            "{}      <coordinates>{}</coordinates>\n",
            indent,
            coordinates(ring)
        ));
        out.push_str(&format!("{}    </LinearRing>\n", indent));
        out.push_str(&format!("{}  </{}>\n", indent, boundary));
    }
    out.push_str(indent);
    out.push_str("</Polygon>\n");
}

/// KML coordinate tuples: `lon,lat` pairs separated by spaces.
fn coordinates(ring: &[Vec<f64>]) -> String {
    ring.iter()
        .map(|position| {
            let lon = position.first().copied().unwrap_or(0.0);
            let lat = position.get(1).copied().unwrap_or(0.0);
            format!("{},{}", lon, lat)
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
