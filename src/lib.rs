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

//! Area-of-interest (AOI) drawing, persistence and export utilities.
//!
//! An AOI is a user-drawn polygon over a map, kept as a [`AoiRecord`] with a
//! stable id, a display name, geodesic area and perimeter on the WGS84
//! ellipsoid, and a creation timestamp. The [`AoiStore`] owns the canonical
//! collection and writes a full GeoJSON snapshot through to a [`Slot`] after
//! every change; the [`Controller`] layers drawing events, export
//! (GeoJSON, WKT, KML) and GeoJSON import on top, keeping an injected render
//! callback in sync with the collection.
//!
//! ```
//! use aoimap::{AoiStore, MemorySlot};
//! use geojson::{Geometry, Value};
//!
//! let mut store = AoiStore::open(MemorySlot::new());
//! let record = store
//!     .create(Geometry::new(Value::Polygon(vec![vec![
//!         vec![0.0, 0.0],
//!         vec![0.01, 0.0],
//!         vec![0.01, 0.01],
//!         vec![0.0, 0.01],
//!         vec![0.0, 0.0],
//!     ]])))
//!     .unwrap();
//!
//! assert_eq!(record.name, "AOI 1");
//! assert!(record.area_sq_meters > 0.0);
//! ```

mod codec;
mod controller;
mod error;
mod json;
pub mod kml;
pub mod metrics;
mod record;
mod slot;
mod store;
pub mod wkt;

pub use crate::codec::{decode, encode_geojson, Decoded, RawAoi};
pub use crate::controller::{Controller, DownloadSink, ExportFormat, ImportOutcome};
pub use crate::error::Error;
pub use crate::record::{format_area, AoiRecord};
pub use crate::slot::{FileSlot, MemorySlot, Slot};
pub use crate::store::AoiStore;
