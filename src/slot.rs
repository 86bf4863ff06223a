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

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::Error;

/// A durable key-value slot holding a single string value.
///
/// Every write replaces the whole value (full-snapshot, never incremental);
/// the store relies on this for its write-through invariant.
pub trait Slot {
    /// The current value, or `None` when nothing has been written yet.
    fn read(&self) -> Result<Option<String>, Error>;

    /// Replace the value.
    fn write(&mut self, value: &str) -> Result<(), Error>;
}

/// Slot backed by a single file on disk.
#[derive(Clone, Debug)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSlot { path: path.into() }
    }
}

impl Slot for FileSlot {
    fn read(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn write(&mut self, value: &str) -> Result<(), Error> {
        fs::write(&self.path, value)?;
        Ok(())
    }
}

/// In-memory slot, for tests and embedders that manage durability
/// themselves.
#[derive(Clone, Debug, Default)]
pub struct MemorySlot {
    value: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        MemorySlot::default()
    }

    /// A slot pre-seeded with a value, as if a previous session had
    /// persisted it.
    pub fn with_value(value: impl Into<String>) -> Self {
        MemorySlot {
            value: Some(value.into()),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> Result<Option<String>, Error> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), Error> {
        self.value = Some(value.to_owned());
        Ok(())
    }
}
