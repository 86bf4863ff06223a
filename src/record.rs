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

use chrono::{SecondsFormat, Utc};
use geojson::{Feature, Geometry};
use uuid::Uuid;

use crate::json::JsonObject;
use crate::metrics;

/// The canonical stored representation of one AOI.
///
/// `id` and `created_at` are assigned once at creation and never change;
/// `area_sq_meters`, `area_display` and `perimeter_meters` are derived from
/// `geometry` and recomputed on every geometry change, so they are never
/// stale.
#[derive(Clone, Debug, PartialEq)]
pub struct AoiRecord {
    /// Opaque unique id, stable across edits and renames.
    pub id: String,
    /// User-editable display label.
    pub name: String,
    /// Polygon or rectangle boundary in geographic (lon, lat) coordinates.
    pub geometry: Geometry,
    /// Derived area in square meters; `0.0` when the geometry cannot be
    /// measured.
    pub area_sq_meters: f64,
    /// Derived human-readable area in square kilometers.
    pub area_display: String,
    /// Derived boundary length in meters.
    pub perimeter_meters: f64,
    /// ISO-8601 creation timestamp, set once.
    pub created_at: String,
    /// Properties carried over from an imported source document that are not
    /// part of the record schema. Preserved through persistence and GeoJSON
    /// export.
    pub extra: JsonObject,
}

/// Format an area in square meters as the display string used in record
/// metadata and exports, e.g. `"0.123 km²"`.
pub fn format_area(area_sq_meters: f64) -> String {
    format!("{:.3} km²", area_sq_meters / 1_000_000.0)
}

impl AoiRecord {
    /// Build a complete record from a raw geometry: fresh id, current
    /// timestamp, derived metrics.
    pub(crate) fn new(geometry: Geometry, name: String) -> Self {
        let mut record = AoiRecord {
            id: Uuid::new_v4().to_string(),
            name,
            geometry,
            area_sq_meters: 0.0,
            area_display: String::new(),
            perimeter_meters: 0.0,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            extra: JsonObject::new(),
        };
        record.refresh_metrics();
        record
    }

    /// Replace the geometry and re-derive the dependent metadata, keeping
    /// identity, name and creation time.
    pub(crate) fn replace_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        self.refresh_metrics();
    }

    fn refresh_metrics(&mut self) {
        self.area_sq_meters = metrics::area(&self.geometry);
        self.perimeter_meters = metrics::perimeter(&self.geometry);
        self.area_display = format_area(self.area_sq_meters);
    }

    /// Render as a GeoJSON Feature with the record metadata embedded as
    /// feature properties. This is the persisted representation and the
    /// GeoJSON export representation.
    pub fn to_feature(&self) -> Feature {
        let mut properties = self.extra.clone();
        properties.insert("name".to_owned(), self.name.clone().into());
        properties.insert("area".to_owned(), self.area_sq_meters.into());
        properties.insert("areaDisplay".to_owned(), self.area_display.clone().into());
        properties.insert("perimeter".to_owned(), self.perimeter_meters.into());
        properties.insert("id".to_owned(), self.id.clone().into());
        properties.insert("createdAt".to_owned(), self.created_at.clone().into());
        Feature {
            bbox: None,
            geometry: Some(self.geometry.clone()),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// Rebuild a record from its persisted Feature form. Returns `None`
    /// when the feature lacks a geometry or the identity properties, which
    /// the store treats as a corrupt slot.
    ///
    /// Derived metadata is recomputed from the geometry rather than trusted,
    /// so re-loading is idempotent and never resurrects stale values.
    pub(crate) fn from_feature(feature: Feature) -> Option<Self> {
        let geometry = feature.geometry?;
        let mut properties = feature.properties.unwrap_or_default();
        let id = take_string(&mut properties, "id")?;
        let created_at = take_string(&mut properties, "createdAt")?;
        let name = take_string(&mut properties, "name").unwrap_or_else(|| "AOI".to_owned());
        for derived in ["area", "areaDisplay", "perimeter"] {
            properties.remove(derived);
        }
        let mut record = AoiRecord {
            id,
            name,
            geometry,
            area_sq_meters: 0.0,
            area_display: String::new(),
            perimeter_meters: 0.0,
            created_at,
            extra: properties,
        };
        record.refresh_metrics();
        Some(record)
    }
}

fn take_string(properties: &mut JsonObject, key: &str) -> Option<String> {
    match properties.remove(key) {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    }
}
