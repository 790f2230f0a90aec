//! Input records and content digests.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// BLAKE3 content hash for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Category assigned by the upstream scan pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ItemCategory {
    Cache,
    Logs,
    Temporary,
    Downloads,
    Trash,
    Developer,
    Duplicate,
    #[default]
    Other,
}

/// A candidate file handed over by the scan pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanableItem {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// Size in bytes as reported by the scan.
    pub size: u64,
    /// Category the scan placed this item in.
    #[serde(default)]
    pub category: ItemCategory,
}

impl CleanableItem {
    /// Create a new item.
    pub fn new(path: impl Into<PathBuf>, size: u64, category: ItemCategory) -> Self {
        Self {
            path: path.into(),
            size,
            category,
        }
    }

    /// Sum the sizes of a slice of items.
    pub fn total_size(items: &[CleanableItem]) -> u64 {
        items.iter().map(|i| i.size).sum()
    }
}
