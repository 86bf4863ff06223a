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

//! Lifecycle orchestration over an [`AoiStore`].
//!
//! The controller wires drawing events, management actions, export and
//! import to the store, and keeps an injected render callback in sync: after
//! every successful mutation the callback receives the full current
//! collection, so the display is always rebuilt from authoritative state.

use log::debug;

use crate::codec::{self, Decoded};
use crate::error::Error;
use crate::record::AoiRecord;
use crate::slot::Slot;
use crate::store::AoiStore;
use crate::{kml, wkt};

/// Export formats offered for the record collection.
///
/// GeoJSON is the only one that round-trips; WKT and KML are lossy
/// one-way exports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    GeoJson,
    Wkt,
    Kml,
}

impl ExportFormat {
    /// The fixed download filename for this format.
    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::GeoJson => "aois.geojson",
            ExportFormat::Wkt => "aois.wkt",
            ExportFormat::Kml => "aois.kml",
        }
    }
}

/// Destination for exported documents, e.g. a browser download or a file
/// picker. Injected so the controller stays independent of the host shell.
pub trait DownloadSink {
    fn save(&mut self, filename: &str, content: &str) -> Result<(), Error>;
}

/// What happened to an uploaded document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The document parsed and this many records were appended.
    Imported(usize),
    /// The document was recognized GeoJSON but held no usable feature;
    /// nothing changed.
    NoFeatures,
    /// The document could not be parsed at all; nothing changed.
    Unparseable,
}

pub struct Controller<S: Slot> {
    store: AoiStore<S>,
    render: Box<dyn FnMut(&[AoiRecord])>,
}

impl<S: Slot> Controller<S> {
    /// Build a controller over `slot`, loading any persisted records and
    /// rendering them immediately.
    pub fn new(slot: S, render: Box<dyn FnMut(&[AoiRecord])>) -> Self {
        let mut controller = Controller {
            store: AoiStore::open(slot),
            render,
        };
        controller.refresh();
        controller
    }

    pub fn records(&self) -> &[AoiRecord] {
        self.store.records()
    }

    /// Handle a freshly drawn shape: a new record is created and rendered.
    pub fn on_draw_created(&mut self, geometry: geojson::Geometry) -> Result<(), Error> {
        let record = self.store.create(geometry)?;
        debug!("created AOI {}", record.id);
        self.refresh();
        Ok(())
    }

    /// Handle an edited shape. The rendered shape carries its record id, so
    /// the event attributes itself; edits for unknown ids are dropped by the
    /// store.
    pub fn on_draw_edited(&mut self, id: &str, geometry: geojson::Geometry) -> Result<(), Error> {
        if self.store.apply_edit(id, geometry)? {
            self.refresh();
        }
        Ok(())
    }

    pub fn rename(&mut self, index: usize, name: &str) -> Result<(), Error> {
        self.store.rename(index, name)?;
        self.refresh();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<(), Error> {
        self.store.remove(index)?;
        self.refresh();
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), Error> {
        self.store.clear()?;
        self.refresh();
        Ok(())
    }

    /// Export the collection in `format`, handing the document to `sink`
    /// under the format's fixed filename.
    ///
    /// An empty collection is refused with [`Error::NothingToExport`] before
    /// any encoding happens.
    pub fn export(&self, format: ExportFormat, sink: &mut dyn DownloadSink) -> Result<(), Error> {
        if self.store.is_empty() {
            return Err(Error::NothingToExport);
        }
        let content = match format {
            ExportFormat::GeoJson => codec::encode_geojson(self.store.records())?,
            ExportFormat::Wkt => wkt::encode(self.store.records()),
            ExportFormat::Kml => kml::encode(self.store.records()),
        };
        sink.save(format.filename(), &content)
    }

    /// Import an uploaded document, appending its features to the
    /// collection. Only a successful parse with at least one usable feature
    /// mutates the store and re-renders.
    pub fn import(&mut self, text: &str) -> Result<ImportOutcome, Error> {
        match codec::decode(text) {
            Decoded::Features(raws) => {
                let appended = self.store.import(raws)?;
                self.refresh();
                Ok(ImportOutcome::Imported(appended))
            }
            Decoded::NoFeatures => Ok(ImportOutcome::NoFeatures),
            Decoded::Unparseable => Ok(ImportOutcome::Unparseable),
        }
    }

    fn refresh(&mut self) {
        (self.render)(self.store.records());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{Controller, DownloadSink, ExportFormat, ImportOutcome};
    use crate::error::Error;
    use crate::slot::MemorySlot;
    use geojson::{Geometry, Value};

    fn square(origin: f64) -> Geometry {
        Geometry::new(Value::Polygon(vec![vec![
            vec![origin, origin],
            vec![origin + 0.01, origin],
            vec![origin + 0.01, origin + 0.01],
            vec![origin, origin + 0.01],
            vec![origin, origin],
        ]]))
    }

    /// Controller plus a log of every collection size handed to the render
    /// callback.
    fn controller() -> (Controller<MemorySlot>, Rc<RefCell<Vec<usize>>>) {
        let renders = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&renders);
        let controller = Controller::new(
            MemorySlot::new(),
            Box::new(move |records| log.borrow_mut().push(records.len())),
        );
        (controller, renders)
    }

    #[derive(Default)]
    struct RecordingSink {
        saved: Vec<(String, String)>,
    }

    impl DownloadSink for RecordingSink {
        fn save(&mut self, filename: &str, content: &str) -> Result<(), Error> {
            self.saved.push((filename.to_owned(), content.to_owned()));
            Ok(())
        }
    }

    #[test]
    fn renders_on_construction_and_after_each_mutation() {
        let (mut controller, renders) = controller();
        assert_eq!(*renders.borrow(), vec![0]);

        controller.on_draw_created(square(0.0)).unwrap();
        controller.on_draw_created(square(1.0)).unwrap();
        controller.remove(0).unwrap();
        assert_eq!(*renders.borrow(), vec![0, 1, 2, 1]);
    }

    #[test]
    fn edit_for_unknown_id_does_not_render() {
        let (mut controller, renders) = controller();
        controller.on_draw_created(square(0.0)).unwrap();
        let renders_before = renders.borrow().len();
        controller.on_draw_edited("missing", square(2.0)).unwrap();
        assert_eq!(renders.borrow().len(), renders_before);
    }

    #[test]
    fn edit_updates_record_and_renders() {
        let (mut controller, renders) = controller();
        controller.on_draw_created(square(0.0)).unwrap();
        let id = controller.records()[0].id.clone();

        controller.on_draw_edited(&id, square(3.0)).unwrap();
        assert_eq!(controller.records()[0].geometry, square(3.0));
        assert_eq!(*renders.borrow(), vec![0, 1, 1]);
    }

    #[test]
    fn export_refuses_empty_collection() {
        let (controller, _) = controller();
        let mut sink = RecordingSink::default();
        for format in [ExportFormat::GeoJson, ExportFormat::Wkt, ExportFormat::Kml] {
            assert!(matches!(
                controller.export(format, &mut sink),
                Err(Error::NothingToExport)
            ));
        }
        assert!(sink.saved.is_empty());
    }

    #[test]
    fn export_uses_fixed_filenames() {
        let (mut controller, _) = controller();
        controller.on_draw_created(square(0.0)).unwrap();

        let mut sink = RecordingSink::default();
        controller.export(ExportFormat::GeoJson, &mut sink).unwrap();
        controller.export(ExportFormat::Wkt, &mut sink).unwrap();
        controller.export(ExportFormat::Kml, &mut sink).unwrap();

        let names: Vec<&str> = sink.saved.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["aois.geojson", "aois.wkt", "aois.kml"]);
        assert!(sink.saved[0].1.contains("FeatureCollection"));
        assert!(sink.saved[1].1.starts_with("POLYGON"));
        assert!(sink.saved[2].1.contains("<kml"));
    }

    #[test]
    fn import_appends_and_renders_once() {
        let (mut controller, renders) = controller();
        let text = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[0.0,0.0],[0.01,0.0],[0.01,0.01],[0.0,0.0]]]},"properties":{"name":"A"}},
            {"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[1.0,1.0],[1.01,1.0],[1.01,1.01],[1.0,1.0]]]},"properties":{"name":"B"}}
        ]}"#;

        assert_eq!(controller.import(text).unwrap(), ImportOutcome::Imported(2));
        assert_eq!(controller.records().len(), 2);
        assert_eq!(*renders.borrow(), vec![0, 2]);
    }

    #[test]
    fn import_of_empty_collection_changes_nothing() {
        let (mut controller, renders) = controller();
        controller.on_draw_created(square(0.0)).unwrap();
        let renders_before = renders.borrow().len();

        let outcome = controller
            .import(r#"{"type":"FeatureCollection","features":[]}"#)
            .unwrap();
        assert_eq!(outcome, ImportOutcome::NoFeatures);
        assert_eq!(controller.records().len(), 1);
        assert_eq!(renders.borrow().len(), renders_before);
    }

    #[test]
    fn import_of_garbage_changes_nothing() {
        let (mut controller, _) = controller();
        assert_eq!(
            controller.import("POLYGON ((0 0, 1 0, 1 1, 0 0))").unwrap(),
            ImportOutcome::Unparseable
        );
        assert!(controller.records().is_empty());
    }

    #[test]
    fn records_survive_reconstruction_over_the_same_slot() {
        let slot = MemorySlot::new();
        let persisted = {
            let mut controller = Controller::new(slot, Box::new(|_| {}));
            controller.on_draw_created(square(0.0)).unwrap();
            controller.rename(0, "Kept").unwrap();
            // The controller owns the slot; replay its persisted value.
            let mut sink = RecordingSink::default();
            controller.export(ExportFormat::GeoJson, &mut sink).unwrap();
            sink.saved.remove(0).1
        };

        let mut reloaded = Controller::new(MemorySlot::new(), Box::new(|_| {}));
        assert_eq!(
            reloaded.import(&persisted).unwrap(),
            ImportOutcome::Imported(1)
        );
        assert_eq!(reloaded.records()[0].name, "Kept");
    }
}
