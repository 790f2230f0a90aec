use fileintel_core::{
    AgeCategory, CleanableItem, ContentHash, DetectionType, DuplicateDetectionResults,
    DuplicateGroup, FileAnalysis, FileErrorKind, GroupKey, ItemCategory, Recommendation,
    RecommendationResult, SkippedFile,
};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

fn analysis(path: &str, size: u64, combined: f64) -> FileAnalysis {
    FileAnalysis {
        path: PathBuf::from(path),
        size_bytes: size,
        modified: SystemTime::now(),
        importance_score: combined,
        access_score: combined,
        combined_score: combined,
        age_category: AgeCategory::Old,
        pattern_match: None,
        recommendation: Recommendation::from_score(combined),
        scoring_version: 1,
    }
}

#[test]
fn test_content_hash_creation_and_hex() {
    let bytes = [0xab; 32];
    let hash = ContentHash::new(bytes);

    let hex = hash.to_hex();
    assert_eq!(hex.len(), 64);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(hex.starts_with("ab"));
    assert_eq!(hash.to_string(), hex);

    assert_eq!(hash, ContentHash::new(bytes));
    assert_ne!(hash, ContentHash::new([0xcd; 32]));
}

#[test]
fn test_recommendation_summary_matches_analyses() {
    let analyses = vec![
        analysis("/a.log", 1024 * 1024, 90.0),
        analysis("/b.tmp", 1024 * 1024, 75.0),
        analysis("/c.txt", 0, 60.0),
        analysis("/d.doc", 2 * 1024 * 1024, 20.0),
    ];
    let skipped = vec![SkippedFile {
        path: PathBuf::from("/missing"),
        kind: FileErrorKind::FileNotFound,
        message: "File not found: /missing".to_string(),
    }];

    let before = chrono::Utc::now();
    let result = RecommendationResult::new(analyses, skipped);
    let after = chrono::Utc::now();

    assert_eq!(result.summary.total_files, 4);
    assert_eq!(result.summary.safe_to_delete, 2);
    assert_eq!(result.summary.review_recommended, 1);
    assert_eq!(result.summary.risky_files, 1);
    assert!((result.summary.total_size_mb - 4.0).abs() < 1e-9);
    assert_eq!(result.skipped.len(), 1);
    assert!(result.timestamp >= before && result.timestamp <= after);
    assert_eq!(result.reclaimable_bytes(), 2 * 1024 * 1024);
    assert_eq!(result.by_recommendation(Recommendation::Keep).count(), 1);
}

#[test]
fn test_space_wasted_formula() {
    let group = DuplicateGroup::new(
        GroupKey::Name("report.txt".into()),
        vec![PathBuf::from("/x/Report.TXT"), PathBuf::from("/y/report.txt")],
        30,
    )
    .unwrap();

    assert_eq!(group.detection_type(), DetectionType::Name);
    assert_eq!(
        group.space_wasted(),
        (group.total_size() / group.count() as u64) * (group.count() as u64 - 1)
    );
}

#[test]
fn test_group_deserialization_enforces_members() {
    let group = DuplicateGroup::new(
        GroupKey::Size(3),
        vec![PathBuf::from("/a"), PathBuf::from("/b")],
        6,
    )
    .unwrap();
    let json = serde_json::to_string(&group).unwrap();
    let parsed: DuplicateGroup = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, group);

    let empty = r#"{"detectionType":"size","files":[],"groupKey":{"size":3},"totalSize":0}"#;
    let err = serde_json::from_str::<DuplicateGroup>(empty).unwrap_err();
    assert!(err.to_string().contains("at least two files"));

    let repeated =
        r#"{"detectionType":"size","files":["/a","/a"],"groupKey":{"size":3},"totalSize":6}"#;
    assert!(serde_json::from_str::<DuplicateGroup>(repeated).is_err());

    let mismatched =
        r#"{"detectionType":"content","files":["/a","/b"],"groupKey":{"size":3},"totalSize":6}"#;
    assert!(serde_json::from_str::<DuplicateGroup>(mismatched).is_err());
}

#[test]
fn test_results_merge_accumulates() {
    let mut first = DuplicateDetectionResults {
        total_files: 5,
        processing_time: Duration::from_millis(10),
        ..Default::default()
    };
    let second = DuplicateDetectionResults {
        size_duplicates: vec![
            DuplicateGroup::new(
                GroupKey::Size(3),
                vec![PathBuf::from("/a"), PathBuf::from("/b")],
                6,
            )
            .unwrap(),
        ],
        total_files: 5,
        processing_time: Duration::from_millis(15),
        ..Default::default()
    };

    first.merge(second);
    assert_eq!(first.total_files, 10);
    assert_eq!(first.processing_time, Duration::from_millis(25));
    assert!(first.has_duplicates());
    assert_eq!(first.all_groups().count(), 1);
}

#[test]
fn test_cleanable_item_total_size() {
    let items = vec![
        CleanableItem::new("/a", 10, ItemCategory::Cache),
        CleanableItem::new("/b", 32, ItemCategory::Logs),
    ];
    assert_eq!(CleanableItem::total_size(&items), 42);
}

#[test]
fn test_results_serialize_for_callers() {
    let result = RecommendationResult::new(vec![analysis("/a.log", 10, 80.0)], Vec::new());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["summary"]["safeToDelete"], 1);
    assert_eq!(json["analyses"][0]["recommendation"], "safeToDelete");
    assert_eq!(json["analyses"][0]["ageCategory"], "old");

    let item: CleanableItem = serde_json::from_str(r#"{"path":"/tmp/x","size":4}"#).unwrap();
    assert_eq!(item.category, ItemCategory::Other);
}
