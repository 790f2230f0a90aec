//! Append-only log of user decisions on recommendations.
//!
//! The store only records observations. Turning them into scoring weight
//! changes is left to whoever consumes [`FeedbackStore::entries`].

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

/// What the user did with a file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FeedbackAction {
    /// Accepted a suggestion and removed the file.
    Deleted,
    /// Chose to keep the file.
    Kept,
    /// Dismissed a suggestion without acting on it.
    Rejected,
    /// Restored a file after deleting it.
    Restored,
}

/// One recorded decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub path: PathBuf,
    pub action: FeedbackAction,
    pub recorded_at: DateTime<Utc>,
}

/// Number of entries per action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackCounts {
    pub deleted: usize,
    pub kept: usize,
    pub rejected: usize,
    pub restored: usize,
}

impl FeedbackCounts {
    /// Total entries counted.
    pub fn total(&self) -> usize {
        self.deleted + self.kept + self.rejected + self.restored
    }
}

/// Thread-safe feedback log. Share it with `Arc`; writers are serialized.
#[derive(Debug, Default)]
pub struct FeedbackStore {
    entries: Mutex<Vec<FeedbackEntry>>,
}

impl FeedbackStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation.
    pub fn record(&self, action: FeedbackAction, path: impl Into<PathBuf>) {
        let entry = FeedbackEntry {
            path: path.into(),
            action,
            recorded_at: Utc::now(),
        };
        debug!(path = %entry.path.display(), %action, "recorded feedback");
        self.lock().push(entry);
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of all entries in recording order.
    pub fn entries(&self) -> Vec<FeedbackEntry> {
        self.lock().clone()
    }

    /// Entries recorded for one path, oldest first.
    pub fn history_for(&self, path: &Path) -> Vec<FeedbackEntry> {
        self.lock()
            .iter()
            .filter(|e| e.path == path)
            .cloned()
            .collect()
    }

    /// Count entries by action.
    pub fn counts(&self) -> FeedbackCounts {
        let mut counts = FeedbackCounts::default();
        for entry in self.lock().iter() {
            match entry.action {
                FeedbackAction::Deleted => counts.deleted += 1,
                FeedbackAction::Kept => counts.kept += 1,
                FeedbackAction::Rejected => counts.rejected += 1,
                FeedbackAction::Restored => counts.restored += 1,
            }
        }
        counts
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic elsewhere while holding the lock cannot leave a half-pushed
    // entry, so the data is still consistent after poisoning.
    fn lock(&self) -> MutexGuard<'_, Vec<FeedbackEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
