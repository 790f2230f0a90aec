//! Analysis algorithms for fileintel.
//!
//! This crate turns a list of candidate paths into cleanup intelligence:
//!
//! - **Hashing** - Chunked BLAKE3 digests with a hard size limit
//! - **Duplicate detection** - Content, name and size lenses run side by side
//! - **Heuristic scoring** - Pattern, directory and age based disposability
//! - **Feedback** - An append-only log of what users did with suggestions
//!
//! # Recommendations
//!
//! ```rust,ignore
//! use fileintel_analyze::FileIntelEngine;
//!
//! let engine = FileIntelEngine::new()?;
//! let result = engine.generate_recommendations(&paths);
//!
//! println!("{} of {} files are safe to delete", result.summary.safe_to_delete, result.summary.total_files);
//! for skipped in &result.skipped {
//!     println!("skipped {}: {}", skipped.path.display(), skipped.message);
//! }
//! ```
//!
//! # Duplicate Detection
//!
//! ```rust,ignore
//! let results = engine.find_all_duplicates(&paths);
//! let stats = results.statistics();
//!
//! println!("{} duplicate files, {} bytes wasted", stats.duplicate_files, stats.space_wasted);
//! for group in &results.content_duplicates {
//!     if let Some(keep) = group.file_to_keep() {
//!         println!("keep {}, delete {:?}", keep.display(), group.files_to_delete());
//!     }
//! }
//! ```

mod duplicates;
mod engine;
mod error;
pub mod feedback;
mod hasher;
pub mod patterns;
mod recommend;
pub mod scorer;

pub use duplicates::{DuplicateCandidate, DuplicateFinder};
pub use engine::FileIntelEngine;
pub use error::EngineError;
pub use feedback::{FeedbackAction, FeedbackCounts, FeedbackEntry, FeedbackStore};
pub use hasher::{FileHasher, hash_bytes};
pub use patterns::{MatchKind, PatternRule, PatternTable};
pub use recommend::aggregate;
pub use scorer::{HeuristicScorer, SCORING_VERSION, ScoringConfig, ScoringConfigBuilder};

// Re-export core types
pub use fileintel_core::{
    AgeCategory, CleanableItem, ContentHash, DetectionType, DuplicateDetectionResults,
    DuplicateGroup, DuplicateStatistics, EngineConfig, FileAnalysis, FileError, FileErrorKind,
    GroupKey, InvalidGroup, ItemCategory, Recommendation, RecommendationResult,
    RecommendationSummary, SkippedFile,
};
