//! Per-file analysis results and their batch container.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::SkippedFile;

const DAY: u64 = 24 * 60 * 60;

/// Files younger than this are [`AgeCategory::New`].
pub const NEW_THRESHOLD: Duration = Duration::from_secs(7 * DAY);
/// Files younger than this are at most [`AgeCategory::Recent`].
pub const RECENT_THRESHOLD: Duration = Duration::from_secs(30 * DAY);
/// Files younger than this are at most [`AgeCategory::Old`].
pub const OLD_THRESHOLD: Duration = Duration::from_secs(365 * DAY);

/// Combined scores strictly above this are safe to delete.
pub const SAFE_TO_DELETE_THRESHOLD: f64 = 70.0;
/// Combined scores strictly above this (and not safe) need review.
pub const REVIEW_THRESHOLD: f64 = 50.0;

/// Coarse bucket of time since last modification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AgeCategory {
    /// Less than 7 days.
    New,
    /// 7 to 30 days.
    Recent,
    /// 30 to 365 days.
    Old,
    /// A year or more.
    VeryOld,
}

impl AgeCategory {
    /// Bucket an elapsed duration. Boundaries belong to the older bucket.
    pub fn from_age(age: Duration) -> Self {
        if age < NEW_THRESHOLD {
            Self::New
        } else if age < RECENT_THRESHOLD {
            Self::Recent
        } else if age < OLD_THRESHOLD {
            Self::Old
        } else {
            Self::VeryOld
        }
    }
}

/// Suggested action for a file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Recommendation {
    SafeToDelete,
    ReviewRecommended,
    Keep,
}

impl Recommendation {
    /// Derive a recommendation from a combined score.
    pub fn from_score(combined_score: f64) -> Self {
        if combined_score > SAFE_TO_DELETE_THRESHOLD {
            Self::SafeToDelete
        } else if combined_score > REVIEW_THRESHOLD {
            Self::ReviewRecommended
        } else {
            Self::Keep
        }
    }
}

/// Heuristic analysis of a single file.
///
/// Scores run in the disposability direction: higher means safer to remove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Last modification time.
    pub modified: SystemTime,
    /// Disposability from file pattern and directory context (0-100).
    pub importance_score: f64,
    /// Disposability from modification recency (0-100).
    pub access_score: f64,
    /// Weighted blend of the two scores above (0-100).
    pub combined_score: f64,
    pub age_category: AgeCategory,
    /// Identifier of the first pattern rule that matched, if any.
    pub pattern_match: Option<CompactString>,
    pub recommendation: Recommendation,
    /// Version of the scoring constants that produced this analysis.
    pub scoring_version: u32,
}

/// Summary counts for a [`RecommendationResult`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub total_files: usize,
    pub safe_to_delete: usize,
    pub review_recommended: usize,
    /// Files whose recommendation is [`Recommendation::Keep`].
    pub risky_files: usize,
    pub total_size_mb: f64,
}

impl RecommendationSummary {
    /// Compute counts over a set of analyses.
    pub fn from_analyses(analyses: &[FileAnalysis]) -> Self {
        let mut summary = Self {
            total_files: analyses.len(),
            ..Self::default()
        };
        let mut total_bytes: u64 = 0;

        for analysis in analyses {
            total_bytes += analysis.size_bytes;
            match analysis.recommendation {
                Recommendation::SafeToDelete => summary.safe_to_delete += 1,
                Recommendation::ReviewRecommended => summary.review_recommended += 1,
                Recommendation::Keep => summary.risky_files += 1,
            }
        }

        summary.total_size_mb = total_bytes as f64 / (1024.0 * 1024.0);
        summary
    }
}

/// Batch of analyses with summary counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub analyses: Vec<FileAnalysis>,
    pub summary: RecommendationSummary,
    /// Creation time of this result.
    pub timestamp: DateTime<Utc>,
    /// Inputs that could not be analyzed.
    pub skipped: Vec<SkippedFile>,
}

impl RecommendationResult {
    /// Build a result; the summary always reflects `analyses`, not the input list.
    pub fn new(analyses: Vec<FileAnalysis>, skipped: Vec<SkippedFile>) -> Self {
        let summary = RecommendationSummary::from_analyses(&analyses);
        Self {
            analyses,
            summary,
            timestamp: Utc::now(),
            skipped,
        }
    }

    /// Analyses with the given recommendation.
    pub fn by_recommendation(
        &self,
        recommendation: Recommendation,
    ) -> impl Iterator<Item = &FileAnalysis> {
        self.analyses
            .iter()
            .filter(move |a| a.recommendation == recommendation)
    }

    /// Bytes that would be freed by deleting every safe-to-delete file.
    pub fn reclaimable_bytes(&self) -> u64 {
        self.by_recommendation(Recommendation::SafeToDelete)
            .map(|a| a.size_bytes)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_boundaries() {
        assert_eq!(Recommendation::from_score(50.0), Recommendation::Keep);
        assert_eq!(Recommendation::from_score(50.01), Recommendation::ReviewRecommended);
        assert_eq!(Recommendation::from_score(70.0), Recommendation::ReviewRecommended);
        assert_eq!(Recommendation::from_score(70.01), Recommendation::SafeToDelete);
        assert_eq!(Recommendation::from_score(0.0), Recommendation::Keep);
        assert_eq!(Recommendation::from_score(100.0), Recommendation::SafeToDelete);
    }

    #[test]
    fn test_age_category_boundaries() {
        let day = Duration::from_secs(DAY);
        assert_eq!(AgeCategory::from_age(Duration::ZERO), AgeCategory::New);
        assert_eq!(AgeCategory::from_age(day * 7 - Duration::from_secs(1)), AgeCategory::New);
        assert_eq!(AgeCategory::from_age(day * 7), AgeCategory::Recent);
        assert_eq!(AgeCategory::from_age(day * 30 - Duration::from_secs(1)), AgeCategory::Recent);
        assert_eq!(AgeCategory::from_age(day * 30), AgeCategory::Old);
        assert_eq!(AgeCategory::from_age(day * 365 - Duration::from_secs(1)), AgeCategory::Old);
        assert_eq!(AgeCategory::from_age(day * 365), AgeCategory::VeryOld);
    }

    #[test]
    fn test_enum_string_forms() {
        assert_eq!(Recommendation::SafeToDelete.to_string(), "safeToDelete");
        assert_eq!(AgeCategory::VeryOld.to_string(), "veryOld");
        assert_eq!("reviewRecommended".parse::<Recommendation>().unwrap(), Recommendation::ReviewRecommended);
    }
}
