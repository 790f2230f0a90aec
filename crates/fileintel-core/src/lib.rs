//! Core types for fileintel.
//!
//! This crate holds the data model shared by the analysis engine and its
//! consumers: per-file analyses, duplicate groups, the error taxonomy and
//! engine configuration. Nothing here touches the filesystem.

mod analysis;
mod config;
mod duplicate;
mod error;
mod item;

pub use analysis::{
    AgeCategory, FileAnalysis, NEW_THRESHOLD, OLD_THRESHOLD, RECENT_THRESHOLD, REVIEW_THRESHOLD,
    Recommendation, RecommendationResult, RecommendationSummary, SAFE_TO_DELETE_THRESHOLD,
};
pub use config::{
    DEFAULT_BATCH_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CONCURRENT_HASHES, DEFAULT_MAX_FILE_SIZE,
    EngineConfig, EngineConfigBuilder,
};
pub use duplicate::{
    DetectionType, DuplicateDetectionResults, DuplicateGroup, DuplicateStatistics, GroupKey,
    InvalidGroup,
};
pub use error::{FileError, FileErrorKind, SkippedFile};
pub use item::{CleanableItem, ContentHash, ItemCategory};
