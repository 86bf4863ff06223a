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

//! GeoJSON exchange: the only format that round-trips the full record
//! collection. WKT and KML export live in [`crate::wkt`] and [`crate::kml`]
//! and are lossy by design; neither is accepted for import.

use geojson::{Feature, FeatureCollection};

use crate::error::Error;
use crate::json::{JsonObject, JsonValue};
use crate::record::AoiRecord;

/// A decoded geometry with whatever source properties accompanied it.
///
/// Decoding assigns no identity and derives no metadata; that is the store's
/// job when the pair is imported.
#[derive(Clone, Debug, PartialEq)]
pub struct RawAoi {
    pub geometry: geojson::Geometry,
    pub properties: Option<JsonObject>,
}

/// Outcome of a best-effort parse of uploaded content.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    /// At least one feature with a geometry was found.
    Features(Vec<RawAoi>),
    /// The content was valid GeoJSON-shaped input but contained no usable
    /// feature (e.g. an empty FeatureCollection).
    NoFeatures,
    /// The content was not valid JSON, or not a recognized GeoJSON shape.
    Unparseable,
}

/// Serialize the record collection as a GeoJSON FeatureCollection, with
/// each record's derived metadata embedded as feature properties.
///
/// The semantic inverse of [`decode`].
pub fn encode_geojson(records: &[AoiRecord]) -> Result<String, Error> {
    let collection = FeatureCollection {
        bbox: None,
        features: records.iter().map(AoiRecord::to_feature).collect(),
        foreign_members: None,
    };
    Ok(serde_json::to_string_pretty(&collection)?)
}

/// Best-effort parse of uploaded text into geometry+properties pairs.
///
/// Accepts a FeatureCollection document, a bare array of features, or a
/// single Feature document. Features without a geometry are dropped. Never
/// panics and never returns an error; anything unrecognized is reported as
/// [`Decoded::Unparseable`].
pub fn decode(text: &str) -> Decoded {
    let value: JsonValue = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => return Decoded::Unparseable,
    };

    let candidates: Vec<JsonValue> = match value {
        JsonValue::Array(features) => features,
        JsonValue::Object(mut object) => {
            let kind = object
                .get("type")
                .and_then(JsonValue::as_str)
                .map(str::to_owned);
            match kind.as_deref() {
                Some("FeatureCollection") => match object.remove("features") {
                    Some(JsonValue::Array(features)) => features,
                    _ => return Decoded::NoFeatures,
                },
                Some("Feature") => vec![JsonValue::Object(object)],
                _ => return Decoded::Unparseable,
            }
        }
        _ => return Decoded::Unparseable,
    };

    let mut raws = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let Ok(feature) = serde_json::from_value::<Feature>(candidate) else {
            continue;
        };
        let Some(geometry) = feature.geometry else {
            continue;
        };
        raws.push(RawAoi {
            geometry,
            properties: feature.properties,
        });
    }

    if raws.is_empty() {
        Decoded::NoFeatures
    } else {
        Decoded::Features(raws)
    }
}
