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

/// Error raised by store, slot and export operations.
///
/// Parse and derivation failures never surface here: degenerate geometry
/// degrades to zero metrics and unreadable persisted state degrades to an
/// empty collection. Only conditions the caller can act on are reported.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An export was requested while the collection is empty. No file is
    /// produced.
    NothingToExport,
    /// The storage slot or download sink failed at the file-system level.
    Io(std::io::Error),
    /// The record collection could not be serialized for persistence.
    Serialize(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NothingToExport => write!(f, "No AOIs to export."),
            Error::Io(ref e) => write!(f, "Storage slot I/O failed: {}", e),
            Error::Serialize(ref e) => write!(f, "Could not serialize AOI records: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::NothingToExport => None,
            Error::Io(ref e) => Some(e),
            Error::Serialize(ref e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialize(e)
    }
}
