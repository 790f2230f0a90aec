//! Duplicate groups and detection results.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::error::SkippedFile;
use crate::item::ContentHash;

/// Lens that produced a duplicate group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DetectionType {
    /// Identical content digest.
    Content,
    /// Same base filename, ignoring case.
    Name,
    /// Same byte size.
    Size,
}

/// The value shared by every member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupKey {
    Content(ContentHash),
    /// Lowercased base filename.
    Name(CompactString),
    Size(u64),
}

impl GroupKey {
    /// Lens this key belongs to.
    pub fn detection_type(&self) -> DetectionType {
        match self {
            Self::Content(_) => DetectionType::Content,
            Self::Name(_) => DetectionType::Name,
            Self::Size(_) => DetectionType::Size,
        }
    }
}

/// Why a set of files cannot form a duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGroup {
    #[error("A duplicate group needs at least two files, got {count}")]
    TooFewFiles { count: usize },

    #[error("Duplicate group lists {path} more than once")]
    RepeatedFile { path: PathBuf },

    #[error("Detection type {detection_type} does not match a {key_type} group key")]
    MismatchedDetectionType {
        detection_type: DetectionType,
        key_type: DetectionType,
    },
}

/// A set of two or more distinct files considered duplicates by one lens.
///
/// Fields are read-only so that every group, including one deserialized
/// from JSON, holds at least two distinct members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDuplicateGroup")]
pub struct DuplicateGroup {
    detection_type: DetectionType,
    /// Members in discovery order.
    files: Vec<PathBuf>,
    group_key: GroupKey,
    /// Sum of member sizes in bytes.
    total_size: u64,
}

/// Unchecked wire form of [`DuplicateGroup`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDuplicateGroup {
    detection_type: DetectionType,
    files: Vec<PathBuf>,
    group_key: GroupKey,
    total_size: u64,
}

impl TryFrom<RawDuplicateGroup> for DuplicateGroup {
    type Error = InvalidGroup;

    fn try_from(raw: RawDuplicateGroup) -> Result<Self, Self::Error> {
        let key_type = raw.group_key.detection_type();
        if raw.detection_type != key_type {
            return Err(InvalidGroup::MismatchedDetectionType {
                detection_type: raw.detection_type,
                key_type,
            });
        }
        Self::try_new(raw.group_key, raw.files, raw.total_size)
    }
}

impl DuplicateGroup {
    /// Build a group, or `None` when fewer than two distinct files are given.
    pub fn new(group_key: GroupKey, files: Vec<PathBuf>, total_size: u64) -> Option<Self> {
        Self::try_new(group_key, files, total_size).ok()
    }

    /// Build a group, reporting why the files were rejected.
    pub fn try_new(
        group_key: GroupKey,
        files: Vec<PathBuf>,
        total_size: u64,
    ) -> Result<Self, InvalidGroup> {
        if files.len() < 2 {
            return Err(InvalidGroup::TooFewFiles { count: files.len() });
        }
        let mut seen = HashSet::with_capacity(files.len());
        if let Some(path) = files.iter().find(|path| !seen.insert(path.as_path())) {
            return Err(InvalidGroup::RepeatedFile { path: path.clone() });
        }

        Ok(Self {
            detection_type: group_key.detection_type(),
            files,
            group_key,
            total_size,
        })
    }

    /// Lens that produced the group.
    pub fn detection_type(&self) -> DetectionType {
        self.detection_type
    }

    /// Members in discovery order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The value every member shares.
    pub fn group_key(&self) -> &GroupKey {
        &self.group_key
    }

    /// Sum of member sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Number of files in the group.
    pub fn count(&self) -> usize {
        self.files.len()
    }

    /// Average member size.
    pub fn per_file_size(&self) -> u64 {
        self.total_size / self.files.len().max(1) as u64
    }

    /// Bytes reclaimable by keeping one copy: per-file size * (count - 1).
    pub fn space_wasted(&self) -> u64 {
        self.per_file_size() * (self.files.len() as u64).saturating_sub(1)
    }

    /// The file to retain: the first one discovered.
    pub fn file_to_keep(&self) -> Option<&Path> {
        self.files.first().map(PathBuf::as_path)
    }

    /// Every file except the one to keep.
    pub fn files_to_delete(&self) -> &[PathBuf] {
        self.files.get(1..).unwrap_or_default()
    }
}

/// Aggregate statistics over all lenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateStatistics {
    /// Distinct files appearing in at least one group.
    pub duplicate_files: usize,
    pub unique_files: usize,
    /// Sum of wasted space over every group of every lens.
    pub space_wasted: u64,
    pub duplicate_percentage: f64,
}

/// Combined output of the three duplicate lenses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateDetectionResults {
    pub content_duplicates: Vec<DuplicateGroup>,
    pub name_duplicates: Vec<DuplicateGroup>,
    pub size_duplicates: Vec<DuplicateGroup>,
    /// Number of input paths, whether or not they could be read.
    pub total_files: usize,
    /// Wall-clock time of detection.
    pub processing_time: Duration,
    /// Inputs dropped from one or more lenses.
    pub skipped: Vec<SkippedFile>,
}

impl DuplicateDetectionResults {
    /// Iterate every group from every lens.
    pub fn all_groups(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.content_duplicates
            .iter()
            .chain(&self.name_duplicates)
            .chain(&self.size_duplicates)
    }

    /// Check if any lens found duplicates.
    pub fn has_duplicates(&self) -> bool {
        self.all_groups().next().is_some()
    }

    /// Derive aggregate statistics.
    pub fn statistics(&self) -> DuplicateStatistics {
        let duplicate_files = self
            .all_groups()
            .flat_map(|g| g.files())
            .collect::<HashSet<_>>()
            .len();
        let space_wasted = self.all_groups().map(DuplicateGroup::space_wasted).sum();
        let duplicate_percentage = if self.total_files > 0 {
            duplicate_files as f64 / self.total_files as f64 * 100.0
        } else {
            0.0
        };

        DuplicateStatistics {
            duplicate_files,
            unique_files: self.total_files.saturating_sub(duplicate_files),
            space_wasted,
            duplicate_percentage,
        }
    }

    /// Append another result, e.g. from a later batch.
    pub fn merge(&mut self, other: DuplicateDetectionResults) {
        self.content_duplicates.extend(other.content_duplicates);
        self.name_duplicates.extend(other.name_duplicates);
        self.size_duplicates.extend(other.size_duplicates);
        self.total_files += other.total_files;
        self.processing_time += other.processing_time;
        self.skipped.extend(other.skipped);
    }
}
