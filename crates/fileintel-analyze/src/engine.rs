//! The engine facade tying scoring, duplicate detection and feedback together.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fileintel_core::{
    CleanableItem, DuplicateDetectionResults, DuplicateGroup, EngineConfig, FileAnalysis,
    FileError, RecommendationResult,
};

use crate::duplicates::{DuplicateCandidate, DuplicateFinder};
use crate::error::EngineError;
use crate::feedback::{FeedbackAction, FeedbackStore};
use crate::scorer::{HeuristicScorer, ScoringConfig};

/// File intelligence engine.
///
/// Cheap to clone; clones share the same hashing pool and feedback store.
#[derive(Clone)]
pub struct FileIntelEngine {
    scorer: Arc<HeuristicScorer>,
    finder: Arc<DuplicateFinder>,
    feedback: Arc<FeedbackStore>,
}

impl FileIntelEngine {
    /// Create an engine with default settings and its own feedback store.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default(), ScoringConfig::default())
    }

    /// Create an engine with custom settings and its own feedback store.
    pub fn with_config(config: EngineConfig, scoring: ScoringConfig) -> Result<Self, EngineError> {
        Ok(Self {
            scorer: Arc::new(HeuristicScorer::with_config(scoring)?),
            finder: Arc::new(DuplicateFinder::with_config(config)?),
            feedback: Arc::new(FeedbackStore::new()),
        })
    }

    /// Use a shared feedback store instead of the engine's own.
    pub fn with_feedback_store(mut self, store: Arc<FeedbackStore>) -> Self {
        self.feedback = store;
        self
    }

    /// The feedback store this engine writes to.
    pub fn feedback_store(&self) -> &Arc<FeedbackStore> {
        &self.feedback
    }

    /// The heuristic scorer.
    pub fn scorer(&self) -> &HeuristicScorer {
        &self.scorer
    }

    /// The duplicate finder.
    pub fn finder(&self) -> &DuplicateFinder {
        &self.finder
    }

    /// Analyze a single file.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<FileAnalysis, FileError> {
        self.scorer.analyze_file(path.as_ref())
    }

    /// Analyze a batch of files, skipping failures.
    pub fn generate_recommendations(&self, paths: &[PathBuf]) -> RecommendationResult {
        self.scorer.generate_recommendations(paths)
    }

    /// Content-duplicate groups.
    pub fn find_duplicates_by_content(&self, paths: &[PathBuf]) -> Vec<DuplicateGroup> {
        self.finder.find_duplicates_by_content(paths)
    }

    /// Name-duplicate groups.
    pub fn find_duplicates_by_name(&self, paths: &[PathBuf]) -> Vec<DuplicateGroup> {
        self.finder.find_duplicates_by_name(paths)
    }

    /// Size-duplicate groups.
    pub fn find_duplicates_by_size(&self, paths: &[PathBuf]) -> Vec<DuplicateGroup> {
        self.finder.find_duplicates_by_size(paths)
    }

    /// All three duplicate lenses, run concurrently.
    pub fn find_all_duplicates(&self, paths: &[PathBuf]) -> DuplicateDetectionResults {
        self.finder.find_all_duplicates(paths)
    }

    /// All three lenses over independent batches. See
    /// [`DuplicateFinder::find_all_duplicates_batched`] for its limits.
    pub fn find_all_duplicates_batched(&self, paths: &[PathBuf]) -> DuplicateDetectionResults {
        self.finder.find_all_duplicates_batched(paths)
    }

    /// Content duplicates among scanned items, largest savings first.
    pub fn detect_duplicates(&self, items: &[CleanableItem]) -> Vec<DuplicateCandidate> {
        self.finder.detect_duplicates(items)
    }

    /// Record what the user did with a file.
    pub fn learn_from_feedback(&self, action: FeedbackAction, path: impl Into<PathBuf>) {
        self.feedback.record(action, path);
    }

    /// [`generate_recommendations`](Self::generate_recommendations) on the blocking pool.
    ///
    /// Wrap in `tokio::time::timeout` to bound the whole batch.
    pub async fn generate_recommendations_async(
        &self,
        paths: Vec<PathBuf>,
    ) -> Result<RecommendationResult, EngineError> {
        let scorer = Arc::clone(&self.scorer);
        let result =
            tokio::task::spawn_blocking(move || scorer.generate_recommendations(&paths)).await?;
        Ok(result)
    }

    /// [`find_all_duplicates`](Self::find_all_duplicates) on the blocking pool.
    pub async fn find_all_duplicates_async(
        &self,
        paths: Vec<PathBuf>,
    ) -> Result<DuplicateDetectionResults, EngineError> {
        let finder = Arc::clone(&self.finder);
        let result = tokio::task::spawn_blocking(move || finder.find_all_duplicates(&paths)).await?;
        Ok(result)
    }
}
