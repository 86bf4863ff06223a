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

//! The canonical AOI collection.
//!
//! The store owns identity assignment, metadata derivation and persistence.
//! Mutations are plain collection edits followed by exactly one
//! [`persist`](AoiStore::persist) call, so the persisted slot and the
//! in-memory collection are equal after every operation (write-through).
//! Collection order is insertion order; removals shift later records down
//! without reordering.

use geojson::{Feature, Geometry};
use log::{debug, warn};

use crate::codec::RawAoi;
use crate::error::Error;
use crate::json::JsonValue;
use crate::record::AoiRecord;
use crate::slot::Slot;

pub struct AoiStore<S: Slot> {
    slot: S,
    records: Vec<AoiRecord>,
}

impl<S: Slot> AoiStore<S> {
    /// Open the store over a slot, loading any previously persisted
    /// collection. An absent or malformed slot value yields an empty
    /// collection; it is never an error.
    pub fn open(slot: S) -> Self {
        let records = load(&slot);
        AoiStore { slot, records }
    }

    /// The collection, in insertion order.
    pub fn records(&self) -> &[AoiRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Create a record from a freshly drawn geometry: fresh id, derived
    /// metrics, placeholder name `AOI <n>` (1-based on the current size),
    /// current timestamp. Appends and persists.
    pub fn create(&mut self, geometry: Geometry) -> Result<&AoiRecord, Error> {
        let name = format!("AOI {}", self.records.len() + 1);
        self.records.push(AoiRecord::new(geometry, name));
        self.persist()?;
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Apply an edited geometry to the record carrying `id`. The viewport
    /// tags each rendered shape with its record id, so edit events
    /// attribute themselves; identity, name and creation time are
    /// preserved and the derived metrics recomputed.
    ///
    /// An unknown id is dropped with a warning and returns `Ok(false)`.
    pub fn apply_edit(&mut self, id: &str, geometry: Geometry) -> Result<bool, Error> {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            warn!("dropping edit for unknown AOI id {}", id);
            return Ok(false);
        };
        record.replace_geometry(geometry);
        self.persist()?;
        Ok(true)
    }

    /// Replace the name of the record at `index`. An out-of-bounds index is
    /// a silent no-op; derived fields and identity are untouched either way.
    pub fn rename(&mut self, index: usize, name: &str) -> Result<(), Error> {
        match self.records.get_mut(index) {
            Some(record) => {
                record.name = name.to_owned();
                self.persist()
            }
            None => Ok(()),
        }
    }

    /// Delete the record at `index`, shifting later records down. An
    /// out-of-bounds index is a silent no-op.
    pub fn remove(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.records.len() {
            return Ok(());
        }
        self.records.remove(index);
        self.persist()
    }

    /// Empty the collection.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.records.clear();
        self.persist()
    }

    /// Append records for a batch of decoded geometry+properties pairs.
    ///
    /// Each pair becomes a new record as in [`create`](AoiStore::create):
    /// a source `name` property wins over the placeholder, other source
    /// properties are carried along, and `id`, `createdAt` and all derived
    /// fields are freshly assigned regardless of what the source claimed.
    /// Persists once for the whole batch; returns the number appended.
    pub fn import(&mut self, raws: Vec<RawAoi>) -> Result<usize, Error> {
        let mut appended = 0;
        for raw in raws {
            let mut properties = raw.properties.unwrap_or_default();
            // Source copies of store-owned fields must not survive.
            for owned in ["id", "createdAt", "area", "areaDisplay", "perimeter"] {
                properties.remove(owned);
            }
            let name = match properties.remove("name") {
                Some(JsonValue::String(name)) => name,
                _ => format!("AOI {}", self.records.len() + 1),
            };
            let mut record = AoiRecord::new(raw.geometry, name);
            record.extra = properties;
            self.records.push(record);
            appended += 1;
        }
        self.persist()?;
        Ok(appended)
    }

    /// Write the full collection snapshot to the slot, replacing any prior
    /// value. Called exactly once per mutating operation.
    fn persist(&mut self) -> Result<(), Error> {
        let features: Vec<Feature> = self.records.iter().map(AoiRecord::to_feature).collect();
        let snapshot = serde_json::to_string(&features)?;
        self.slot.write(&snapshot)?;
        debug!("persisted {} AOI records", self.records.len());
        Ok(())
    }

    #[cfg(test)]
    fn slot(&self) -> &S {
        &self.slot
    }
}

/// Read the persisted collection. Anything unreadable — slot failure,
/// invalid JSON, or records missing their identity — degrades to an empty
/// collection with a warning; this function never fails.
fn load<S: Slot>(slot: &S) -> Vec<AoiRecord> {
    let raw = match slot.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("could not read AOI slot, starting empty: {}", e);
            return Vec::new();
        }
    };
    let features: Vec<Feature> = match serde_json::from_str(&raw) {
        Ok(features) => features,
        Err(e) => {
            warn!("corrupt AOI slot value, starting empty: {}", e);
            return Vec::new();
        }
    };
    let count = features.len();
    let records: Vec<AoiRecord> = features
        .into_iter()
        .filter_map(AoiRecord::from_feature)
        .collect();
    if records.len() < count {
        warn!(
            "corrupt AOI slot value ({} of {} records unreadable), starting empty",
            count - records.len(),
            count
        );
        return Vec::new();
    }
    records
}
