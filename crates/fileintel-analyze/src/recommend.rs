//! Batching per-file analyses into a recommendation result.

use tracing::{debug, warn};

use fileintel_core::{FileAnalysis, FileError, RecommendationResult, SkippedFile};

/// Fold per-file outcomes into a [`RecommendationResult`].
///
/// Failures become [`SkippedFile`] entries and never abort the batch.
/// Successful analyses keep their input order.
pub fn aggregate<I>(outcomes: I) -> RecommendationResult
where
    I: IntoIterator<Item = Result<FileAnalysis, FileError>>,
{
    let mut analyses = Vec::new();
    let mut skipped = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(analysis) => analyses.push(analysis),
            Err(err) => {
                warn!(path = %err.path().display(), kind = %err.kind(), "skipping file: {err}");
                skipped.push(SkippedFile::from(err));
            }
        }
    }

    let result = RecommendationResult::new(analyses, skipped);
    debug!(
        analyzed = result.summary.total_files,
        safe_to_delete = result.summary.safe_to_delete,
        skipped = result.skipped.len(),
        "recommendations generated"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use fileintel_core::{AgeCategory, FileErrorKind, Recommendation};
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn analysis(path: &str, combined: f64) -> FileAnalysis {
        FileAnalysis {
            path: PathBuf::from(path),
            size_bytes: 10,
            modified: SystemTime::now(),
            importance_score: combined,
            access_score: combined,
            combined_score: combined,
            age_category: AgeCategory::New,
            pattern_match: None,
            recommendation: Recommendation::from_score(combined),
            scoring_version: 1,
        }
    }

    #[test]
    fn test_failures_are_recorded_not_counted() {
        let result = aggregate(vec![
            Ok(analysis("/a", 90.0)),
            Err(FileError::FileNotFound {
                path: PathBuf::from("/gone"),
            }),
            Ok(analysis("/b", 10.0)),
        ]);

        assert_eq!(result.summary.total_files, 2);
        assert_eq!(result.summary.safe_to_delete, 1);
        assert_eq!(result.summary.risky_files, 1);
        assert_eq!(result.analyses[0].path, PathBuf::from("/a"));
        assert_eq!(result.analyses[1].path, PathBuf::from("/b"));
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].kind, FileErrorKind::FileNotFound);
    }

    #[test]
    fn test_empty_batch() {
        let result = aggregate(Vec::new());
        assert_eq!(result.summary.total_files, 0);
        assert_eq!(result.summary.total_size_mb, 0.0);
        assert!(result.skipped.is_empty());
    }
}
