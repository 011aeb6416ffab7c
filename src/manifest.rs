//! The output manifest: source file name → generated file paths.
//!
//! ```json
//! {
//!   "photo.jpg": {
//!     "1600": "images/optimized/photo-1600.webp",
//!     "900": "images/optimized/photo-900.webp",
//!     "placeholder": "images/optimized/photo-placeholder.jpg"
//!   }
//! }
//! ```
//!
//! Both levels are JSON objects whose key order is meaningful: sources appear
//! in processing order, labels in render order. They are kept as ordered
//! vectors and serialized as maps.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("cannot write manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output paths for one fully converted source image, keyed by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionEntry {
    outputs: Vec<(String, String)>,
}

impl ConversionEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, path: impl Into<String>) {
        self.outputs.push((label.into(), path.into()));
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| p.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|(l, _)| l.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|(_, p)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl Serialize for ConversionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.outputs.len()))?;
        for (label, path) in &self.outputs {
            map.serialize_entry(label, path)?;
        }
        map.end()
    }
}

/// Ordered mapping from source file name to its conversion entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<(String, ConversionEntry)>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a converted source.
    ///
    /// A repeated file name keeps its original position and takes the new entry.
    pub fn insert(&mut self, filename: impl Into<String>, entry: ConversionEntry) {
        let filename = filename.into();
        match self.entries.iter_mut().find(|(name, _)| *name == filename) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((filename, entry)),
        }
    }

    pub fn get(&self, filename: &str) -> Option<&ConversionEntry> {
        self.entries
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, entry)| entry)
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON with 2-space indentation.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (filename, entry) in &self.entries {
            map.serialize_entry(filename, entry)?;
        }
        map.end()
    }
}

/// Write the manifest, replacing any previous file at `path`.
///
/// The JSON goes to a sibling temporary file first and is renamed into place,
/// so readers see either the old manifest or the complete new one.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
    let json = manifest.to_json()?;
    let io_err = |source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json.as_bytes()).map_err(io_err)?;
    fs::rename(&tmp_path, path).map_err(io_err)
}
