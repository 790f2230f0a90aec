//! Heuristic disposability scoring.
//!
//! Every score runs in the same direction: higher means safer to delete.
//!
//! - **Importance** comes from the first matching pattern rule, shifted by
//!   directory context (user folders lower it, cache/build folders raise it)
//! - **Access** is a piecewise-linear function of time since modification
//! - **Combined** is `w * importance + (1 - w) * access` with `w = 0.6` by default
//!
//! All constants here are versioned by [`SCORING_VERSION`]; changing any of
//! them changes recommendations and must bump the version.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};

use compact_str::CompactString;
use derive_builder::Builder;
use rayon::prelude::*;

use fileintel_core::{AgeCategory, FileAnalysis, FileError, Recommendation, RecommendationResult};

use crate::error::EngineError;
use crate::patterns::{PatternRule, PatternTable};
use crate::recommend::aggregate;

/// Version of the scoring constants below.
pub const SCORING_VERSION: u32 = 1;

/// Importance for files with no pattern match and no special directory.
pub const DEFAULT_IMPORTANCE: f64 = 50.0;

/// Weight of importance in the combined score; access gets the remainder.
pub const DEFAULT_IMPORTANCE_WEIGHT: f64 = 0.6;

/// Applied when any ancestor is a user-content folder.
pub const USER_CONTENT_ADJUSTMENT: f64 = -20.0;

/// Applied when any ancestor is a cache, build, or download folder.
pub const DISPOSABLE_DIR_ADJUSTMENT: f64 = 15.0;

const USER_CONTENT_DIRS: &[&str] = &[
    "desktop", "documents", "pictures", "photos", "music", "movies", "videos",
];

const DISPOSABLE_DIRS: &[&str] = &[
    "cache", "caches", ".cache", "tmp", "temp", "build", "dist", "target", "downloads", "trash",
    ".trash",
];

/// `(age in days, access score)` control points; flat after the last one.
const ACCESS_CURVE: &[(f64, f64)] = &[
    (0.0, 0.0),
    (7.0, 20.0),
    (30.0, 40.0),
    (365.0, 80.0),
    (730.0, 100.0),
];

const SECS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Configuration for heuristic scoring.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScoringConfig {
    /// Reference time for age calculations (default: now, read per file).
    #[builder(default, setter(into, strip_option))]
    pub reference_time: Option<SystemTime>,

    /// Weight of the importance score in the combined score.
    #[builder(default = "DEFAULT_IMPORTANCE_WEIGHT")]
    pub importance_weight: f64,

    /// Pattern rules in evaluation order.
    #[builder(default = "PatternTable::default_rules()")]
    pub rules: Vec<PatternRule>,
}

impl ScoringConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(weight) = self.importance_weight {
            check_weight(weight)?;
        }
        Ok(())
    }
}

fn check_weight(weight: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&weight) {
        Ok(())
    } else {
        Err(format!("importance_weight must be within [0, 1], got {weight}"))
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            reference_time: None,
            importance_weight: DEFAULT_IMPORTANCE_WEIGHT,
            rules: PatternTable::default_rules(),
        }
    }
}

impl ScoringConfig {
    /// Create a new config builder.
    pub fn builder() -> ScoringConfigBuilder {
        ScoringConfigBuilder::default()
    }
}

/// Per-file heuristic scorer.
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    config: ScoringConfig,
    patterns: PatternTable,
}

impl HeuristicScorer {
    /// Create a scorer with default config.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(ScoringConfig::default())
    }

    /// Create a scorer with custom config.
    pub fn with_config(config: ScoringConfig) -> Result<Self, EngineError> {
        check_weight(config.importance_weight).map_err(EngineError::invalid_config)?;
        let patterns = PatternTable::new(config.rules.clone())?;
        Ok(Self { config, patterns })
    }

    /// The compiled pattern table.
    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Read metadata for a file and score it.
    pub fn analyze_file(&self, path: &Path) -> Result<FileAnalysis, FileError> {
        let metadata = fs::metadata(path).map_err(|e| FileError::metadata(path, e))?;
        if !metadata.is_file() {
            return Err(FileError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let modified = metadata
            .modified()
            .map_err(|e| FileError::metadata(path, e))?;

        Ok(self.score(path, metadata.len(), modified))
    }

    /// Analyze every path, skipping the ones that fail.
    ///
    /// The summary counts only cover the analyses that succeeded.
    pub fn generate_recommendations(&self, paths: &[PathBuf]) -> RecommendationResult {
        let outcomes: Vec<Result<FileAnalysis, FileError>> = paths
            .par_iter()
            .map(|path| self.analyze_file(path))
            .collect();

        aggregate(outcomes)
    }

    /// Score a file from already-known size and modification time.
    pub fn score(&self, path: &Path, size: u64, modified: SystemTime) -> FileAnalysis {
        let reference = self.config.reference_time.unwrap_or_else(SystemTime::now);
        let age = reference.duration_since(modified).unwrap_or(Duration::ZERO);

        let rule = self.patterns.first_match(path);
        let importance_score = importance_score(path, rule.map(|r| r.score));
        let access_score = access_score(age);
        let combined_score =
            combined_score(importance_score, access_score, self.config.importance_weight);

        FileAnalysis {
            path: path.to_path_buf(),
            size_bytes: size,
            modified,
            importance_score,
            access_score,
            combined_score,
            age_category: AgeCategory::from_age(age),
            pattern_match: rule.map(|r| CompactString::from(r.id.as_str())),
            recommendation: Recommendation::from_score(combined_score),
            scoring_version: SCORING_VERSION,
        }
    }
}

/// Disposability from a pattern score and the path's ancestor directories.
pub fn importance_score(path: &Path, pattern_score: Option<f64>) -> f64 {
    let base = pattern_score.unwrap_or(DEFAULT_IMPORTANCE);
    (base + directory_adjustment(path)).clamp(0.0, 100.0)
}

/// Score shift from ancestor directory names. User content wins over disposable.
pub fn directory_adjustment(path: &Path) -> f64 {
    let ancestors: Vec<String> = path
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().to_lowercase()),
            _ => None,
        })
        .collect();

    let has_any = |names: &[&str]| ancestors.iter().any(|a| names.contains(&a.as_str()));

    if has_any(USER_CONTENT_DIRS) {
        USER_CONTENT_ADJUSTMENT
    } else if has_any(DISPOSABLE_DIRS) {
        DISPOSABLE_DIR_ADJUSTMENT
    } else {
        0.0
    }
}

/// Disposability from time since last modification.
pub fn access_score(age: Duration) -> f64 {
    let days = age.as_secs_f64() / SECS_PER_DAY;

    for pair in ACCESS_CURVE.windows(2) {
        let (d0, s0) = pair[0];
        let (d1, s1) = pair[1];
        if days < d1 {
            return s0 + (days - d0).max(0.0) / (d1 - d0) * (s1 - s0);
        }
    }

    ACCESS_CURVE.last().map_or(100.0, |&(_, score)| score)
}

/// Weighted blend of importance and access, clamped to 0-100.
pub fn combined_score(importance: f64, access: f64, importance_weight: f64) -> f64 {
    let w = importance_weight.clamp(0.0, 1.0);
    (w * importance + (1.0 - w) * access).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_access_curve_points() {
        assert!(approx(access_score(Duration::ZERO), 0.0));
        assert!(approx(access_score(DAY * 7), 20.0));
        assert!(approx(access_score(DAY * 30), 40.0));
        assert!(approx(access_score(DAY * 365), 80.0));
        assert!(approx(access_score(DAY * 730), 100.0));
        assert!(approx(access_score(DAY * 5000), 100.0));
    }

    #[test]
    fn test_access_tracks_age_category() {
        for days in [0u32, 3, 6, 7, 20, 29, 30, 200, 364, 365, 500, 2000] {
            let age = DAY * days;
            let score = access_score(age);
            let (lo, hi) = match AgeCategory::from_age(age) {
                AgeCategory::New => (0.0, 20.0),
                AgeCategory::Recent => (20.0, 40.0),
                AgeCategory::Old => (40.0, 80.0),
                AgeCategory::VeryOld => (80.0, 100.1),
            };
            assert!(score >= lo && score < hi, "{days} days scored {score}");
        }
    }

    #[test]
    fn test_directory_adjustment() {
        assert_eq!(directory_adjustment(Path::new("/home/u/Documents/a.txt")), USER_CONTENT_ADJUSTMENT);
        assert_eq!(directory_adjustment(Path::new("/home/u/Downloads/a.zip")), DISPOSABLE_DIR_ADJUSTMENT);
        assert_eq!(directory_adjustment(Path::new("/home/u/Library/Caches/x")), DISPOSABLE_DIR_ADJUSTMENT);
        assert_eq!(directory_adjustment(Path::new("/home/u/Desktop/build/out.o")), USER_CONTENT_ADJUSTMENT);
        assert_eq!(directory_adjustment(Path::new("/home/u/src/main.rs")), 0.0);
        // Only ancestors count, not the file name itself.
        assert_eq!(directory_adjustment(Path::new("/home/u/downloads")), 0.0);
    }

    #[test]
    fn test_importance_defaults_to_mid_range() {
        let score = importance_score(Path::new("/home/u/src/notes.txt"), None);
        assert!(approx(score, DEFAULT_IMPORTANCE));
        assert!((40.0..=60.0).contains(&score));
    }

    #[test]
    fn test_importance_is_clamped() {
        assert!(approx(importance_score(Path::new("/tmp/x.tmp"), Some(95.0)), 100.0));
        assert!(approx(importance_score(Path::new("/Users/u/Documents/x"), Some(10.0)), 0.0));
    }

    #[test]
    fn test_combined_score_weights() {
        assert!(approx(combined_score(100.0, 0.0, 0.6), 60.0));
        assert!(approx(combined_score(0.0, 100.0, 0.6), 40.0));
        assert!(approx(combined_score(80.0, 80.0, 0.6), 80.0));
        assert!(approx(combined_score(50.0, 20.0, 0.0), 20.0));
    }

    #[test]
    fn test_score_without_io() {
        let reference = SystemTime::UNIX_EPOCH + DAY * 10_000;
        let scorer = HeuristicScorer::with_config(
            ScoringConfig::builder().reference_time(reference).build().unwrap(),
        )
        .unwrap();

        let analysis = scorer.score(Path::new("/var/app/cache123.tmp"), 42, reference - DAY * 400);
        assert_eq!(analysis.age_category, AgeCategory::VeryOld);
        assert_eq!(analysis.pattern_match.as_deref(), Some("tmp"));
        assert!(analysis.importance_score >= 80.0);
        assert_eq!(analysis.recommendation, Recommendation::SafeToDelete);
        assert_eq!(analysis.scoring_version, SCORING_VERSION);

        let fresh = scorer.score(Path::new("/home/u/Documents/thesis.docx"), 42, reference);
        assert_eq!(fresh.age_category, AgeCategory::New);
        assert_eq!(fresh.pattern_match, None);
        assert_eq!(fresh.recommendation, Recommendation::Keep);
    }

    #[test]
    fn test_future_modification_counts_as_new() {
        let reference = SystemTime::UNIX_EPOCH + DAY * 100;
        let scorer = HeuristicScorer::with_config(
            ScoringConfig::builder().reference_time(reference).build().unwrap(),
        )
        .unwrap();
        let analysis = scorer.score(Path::new("/x/a.txt"), 1, reference + DAY);
        assert_eq!(analysis.age_category, AgeCategory::New);
        assert!(approx(analysis.access_score, 0.0));
    }

    #[test]
    fn test_invalid_weight_rejected() {
        assert!(ScoringConfig::builder().importance_weight(1.5).build().is_err());
        let config = ScoringConfig {
            importance_weight: -0.1,
            ..ScoringConfig::default()
        };
        assert!(matches!(
            HeuristicScorer::with_config(config),
            Err(EngineError::InvalidConfig { .. })
        ));
    }
}
