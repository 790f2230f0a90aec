//! Duplicate detection through three independent lenses.
//!
//! - **Content**: BLAKE3 digest of the full file, hashed on a bounded pool
//! - **Name**: case-insensitive base filename, directory ignored
//! - **Size**: exact byte length
//!
//! The lenses never reconcile with each other, so a pair of files may show up
//! in more than one lens. Members of a group are kept in input order; the
//! order of groups themselves is not part of the contract. A path listed more
//! than once is considered once, at its first position.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use compact_str::CompactString;
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use fileintel_core::{
    CleanableItem, ContentHash, DuplicateDetectionResults, DuplicateGroup, EngineConfig, FileError,
    GroupKey, SkippedFile,
};

use crate::error::EngineError;
use crate::hasher::FileHasher;

/// A content-duplicate group annotated with the space deleting it would free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCandidate {
    pub group: DuplicateGroup,
    pub space_savings: u64,
}

impl From<DuplicateGroup> for DuplicateCandidate {
    fn from(group: DuplicateGroup) -> Self {
        let space_savings = group.space_wasted();
        Self {
            group,
            space_savings,
        }
    }
}

/// Groups and per-file failures from a single lens.
#[derive(Debug, Default)]
struct LensOutput {
    groups: Vec<DuplicateGroup>,
    skipped: Vec<SkippedFile>,
}

/// Duplicate file finder.
pub struct DuplicateFinder {
    config: EngineConfig,
    hasher: FileHasher,
    hash_pool: ThreadPool,
}

impl DuplicateFinder {
    /// Create a finder with default config.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default())
    }

    /// Create a finder with custom config.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        if config.max_concurrent_hashes == 0 {
            return Err(EngineError::invalid_config(
                "max_concurrent_hashes must be greater than zero",
            ));
        }
        if config.batch_size == 0 {
            return Err(EngineError::invalid_config(
                "batch_size must be greater than zero",
            ));
        }

        // Every hash holds one open file, so the pool width caps open handles.
        let hash_pool = ThreadPoolBuilder::new()
            .num_threads(config.max_concurrent_hashes)
            .thread_name(|i| format!("fileintel-hash-{i}"))
            .build()?;

        Ok(Self {
            hasher: FileHasher::with_config(&config),
            config,
            hash_pool,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The hasher used by the content lens.
    pub fn hasher(&self) -> &FileHasher {
        &self.hasher
    }

    /// Group files with identical content.
    pub fn find_duplicates_by_content(&self, paths: &[PathBuf]) -> Vec<DuplicateGroup> {
        self.content_lens(paths).groups
    }

    /// Group files whose base names match, ignoring case.
    pub fn find_duplicates_by_name(&self, paths: &[PathBuf]) -> Vec<DuplicateGroup> {
        self.name_lens(paths).groups
    }

    /// Group files with exactly the same size.
    pub fn find_duplicates_by_size(&self, paths: &[PathBuf]) -> Vec<DuplicateGroup> {
        self.size_lens(paths).groups
    }

    /// Run all three lenses concurrently.
    pub fn find_all_duplicates(&self, paths: &[PathBuf]) -> DuplicateDetectionResults {
        let start = Instant::now();

        let (content, (name, size)) = rayon::join(
            || self.content_lens(paths),
            || rayon::join(|| self.name_lens(paths), || self.size_lens(paths)),
        );

        let skipped = merge_skipped([content.skipped, name.skipped, size.skipped]);
        let processing_time = start.elapsed();

        debug!(
            files = paths.len(),
            content_groups = content.groups.len(),
            name_groups = name.groups.len(),
            size_groups = size.groups.len(),
            skipped = skipped.len(),
            elapsed_ms = processing_time.as_millis() as u64,
            "duplicate detection finished"
        );

        DuplicateDetectionResults {
            content_duplicates: content.groups,
            name_duplicates: name.groups,
            size_duplicates: size.groups,
            total_files: paths.len(),
            processing_time,
            skipped,
        }
    }

    /// Run [`find_all_duplicates`](Self::find_all_duplicates) over fixed-size batches.
    ///
    /// Each batch is processed on its own and the results are concatenated.
    /// Duplicates whose members land in different batches are not detected.
    pub fn find_all_duplicates_batched(&self, paths: &[PathBuf]) -> DuplicateDetectionResults {
        let start = Instant::now();
        let mut results = DuplicateDetectionResults::default();

        for (index, batch) in paths.chunks(self.config.batch_size).enumerate() {
            let batch_results = self.find_all_duplicates(batch);
            debug!(batch = index, files = batch.len(), "processed duplicate batch");
            results.merge(batch_results);
        }

        results.processing_time = start.elapsed();
        results
    }

    /// Find content duplicates among items that already carry their size.
    ///
    /// Items whose size is unique cannot have a content twin, so only
    /// size-matched items are hashed.
    pub fn detect_duplicates(&self, items: &[CleanableItem]) -> Vec<DuplicateCandidate> {
        let mut seen: IndexSet<&Path> = IndexSet::new();
        let mut by_size: IndexMap<u64, Vec<&CleanableItem>> = IndexMap::new();
        for item in items.iter().filter(|item| seen.insert(item.path.as_path())) {
            by_size.entry(item.size).or_default().push(item);
        }

        let candidates: Vec<&CleanableItem> = by_size
            .into_values()
            .filter(|group| group.len() > 1)
            .flatten()
            .collect();

        let hashed = self.hash_all(candidates.iter().map(|item| item.path.as_path()));

        let mut groups: IndexMap<ContentHash, (Vec<PathBuf>, u64)> = IndexMap::new();
        for (item, result) in candidates.iter().zip(hashed) {
            match result {
                Ok(hash) => {
                    let entry = groups.entry(hash).or_default();
                    entry.0.push(item.path.clone());
                    entry.1 += item.size;
                }
                Err(err) => log_skip(&err),
            }
        }

        let mut result: Vec<DuplicateCandidate> = groups
            .into_iter()
            .filter_map(|(hash, (files, total))| {
                DuplicateGroup::new(GroupKey::Content(hash), files, total)
            })
            .map(DuplicateCandidate::from)
            .collect();

        result.sort_by(|a, b| b.space_savings.cmp(&a.space_savings));
        result
    }

    /// Hash files on the bounded pool. Output order matches input order.
    fn hash_all<'a>(
        &self,
        paths: impl Iterator<Item = &'a Path>,
    ) -> Vec<Result<ContentHash, FileError>> {
        let paths: Vec<&Path> = paths.collect();
        self.on_hash_pool(&paths, |path| self.hasher.hash(path))
    }

    /// Run `op` over every path on the hashing pool, at most
    /// `max_concurrent_hashes` at a time.
    fn on_hash_pool<T, F>(&self, paths: &[&Path], op: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&Path) -> T + Sync,
    {
        self.hash_pool
            .install(|| paths.par_iter().map(|path| op(*path)).collect())
    }

    fn content_lens(&self, paths: &[PathBuf]) -> LensOutput {
        let paths = distinct_paths(paths);
        let hashed = self.hash_all(paths.iter().map(|path| path.as_path()));

        // Size comes from a separate stat so hashing stays a pure digest call.
        let keyed = paths.iter().zip(hashed).map(|(path, result)| -> Result<_, FileError> {
            let hash = result?;
            let size = file_size(path)?;
            Ok((GroupKey::Content(hash), size))
        });

        collect_groups(&paths, keyed)
    }

    /// Names need no file access, so paths that cannot be stat'ed still
    /// group and count as zero bytes.
    fn name_lens(&self, paths: &[PathBuf]) -> LensOutput {
        let paths = distinct_paths(paths);
        let keyed = paths.iter().map(|path| -> Result<_, FileError> {
            let name = name_key(path)?;
            let size = file_size(path).unwrap_or(0);
            Ok((GroupKey::Name(name), size))
        });

        collect_groups(&paths, keyed)
    }

    fn size_lens(&self, paths: &[PathBuf]) -> LensOutput {
        let paths = distinct_paths(paths);
        let keyed = paths.iter().map(|path| -> Result<_, FileError> {
            let size = file_size(path)?;
            Ok((GroupKey::Size(size), size))
        });

        collect_groups(&paths, keyed)
    }
}

/// Input paths with repeats removed, keeping first occurrences in order.
fn distinct_paths(paths: &[PathBuf]) -> Vec<&PathBuf> {
    paths.iter().collect::<IndexSet<_>>().into_iter().collect()
}

/// Group paths by key, dropping failures and singleton groups.
fn collect_groups<I>(paths: &[&PathBuf], keyed: I) -> LensOutput
where
    I: Iterator<Item = Result<(GroupKey, u64), FileError>>,
{
    let mut groups: IndexMap<GroupKey, (Vec<PathBuf>, u64)> = IndexMap::new();
    let mut skipped = Vec::new();

    for (path, result) in paths.iter().zip(keyed) {
        match result {
            Ok((key, size)) => {
                let entry = groups.entry(key).or_default();
                entry.0.push(PathBuf::clone(path));
                entry.1 += size;
            }
            Err(err) => {
                log_skip(&err);
                skipped.push(SkippedFile::from(err));
            }
        }
    }

    let groups = groups
        .into_iter()
        .filter_map(|(key, (files, total))| DuplicateGroup::new(key, files, total))
        .collect();

    LensOutput { groups, skipped }
}

/// Combine skip lists from several lenses, keeping one entry per path.
fn merge_skipped<const N: usize>(lists: [Vec<SkippedFile>; N]) -> Vec<SkippedFile> {
    let mut by_path: IndexMap<PathBuf, SkippedFile> = IndexMap::new();
    for skipped in lists.into_iter().flatten() {
        by_path.entry(skipped.path.clone()).or_insert(skipped);
    }
    by_path.into_values().collect()
}

fn log_skip(err: &FileError) {
    warn!(path = %err.path().display(), kind = %err.kind(), "skipping file: {err}");
}

/// Size of a regular file.
fn file_size(path: &Path) -> Result<u64, FileError> {
    let metadata = fs::metadata(path).map_err(|e| FileError::metadata(path, e))?;
    if !metadata.is_file() {
        return Err(FileError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(metadata.len())
}

/// Lowercased base filename used as the name-lens key.
fn name_key(path: &Path) -> Result<CompactString, FileError> {
    path.file_name()
        .map(|name| CompactString::from(name.to_string_lossy().to_lowercase()))
        .ok_or_else(|| FileError::InvalidFileFormat {
            path: path.to_path_buf(),
            reason: "path has no file name".to_string(),
        })
}
