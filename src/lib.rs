//! fileintel - duplicate grouping and disposability scoring for file sets.
//!
//! Given a list of candidate paths, the engine:
//!
//! - groups duplicates by content digest, base name and size
//! - scores each file for how safe it is to delete and recommends
//!   `safeToDelete`, `reviewRecommended` or `keep`
//! - records what the user did with those recommendations
//!
//! It does not walk directories, delete files or persist results; callers
//! supply the paths and decide what to do with the output.
//!
//! ```rust,ignore
//! use fileintel::{FeedbackAction, FileIntelEngine};
//!
//! let engine = FileIntelEngine::new()?;
//! let recommendations = engine.generate_recommendations(&paths);
//! let duplicates = engine.find_all_duplicates(&paths);
//!
//! engine.learn_from_feedback(FeedbackAction::Deleted, &paths[0]);
//! ```

pub use fileintel_analyze::*;
pub use fileintel_core::{
    DEFAULT_BATCH_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CONCURRENT_HASHES, DEFAULT_MAX_FILE_SIZE,
    EngineConfigBuilder, NEW_THRESHOLD, OLD_THRESHOLD, RECENT_THRESHOLD, REVIEW_THRESHOLD,
    SAFE_TO_DELETE_THRESHOLD,
};
