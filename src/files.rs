//! In-memory file set handed over by the host build pipeline

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key/value metadata attached to a file
pub type Metadata = Map<String, Value>;

/// Mapping of `/`-separated path to file record
pub type FileSet = BTreeMap<String, FileRecord>;

/// A single file buffer and its metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(skip)]
    pub contents: Vec<u8>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl FileRecord {
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: contents.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(contents: impl Into<Vec<u8>>, metadata: Metadata) -> Self {
        Self {
            contents: contents.into(),
            metadata,
        }
    }

    /// Merge `incoming` into this file's metadata; incoming keys win
    pub fn merge_metadata(&mut self, incoming: Metadata) {
        for (key, value) in incoming {
            self.metadata.insert(key, value);
        }
    }
}

/// Normalize a host path to the `/`-separated form used as file set key
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
