//! Engine configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default read chunk for hashing (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Default upper bound on hashable file size (1 GiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Default number of files hashed at the same time.
pub const DEFAULT_MAX_CONCURRENT_HASHES: usize = 4;

/// Default number of files per batch in batched duplicate detection.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Configuration for hashing and duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct EngineConfig {
    /// Bytes read per chunk while hashing.
    #[builder(default = "DEFAULT_CHUNK_SIZE")]
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Files above this size are rejected instead of hashed.
    #[builder(default = "DEFAULT_MAX_FILE_SIZE")]
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Maximum number of files open for hashing at once.
    #[builder(default = "DEFAULT_MAX_CONCURRENT_HASHES")]
    #[serde(default = "default_max_concurrent_hashes")]
    pub max_concurrent_hashes: usize,

    /// Files per batch for batched duplicate detection.
    #[builder(default = "DEFAULT_BATCH_SIZE")]
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_max_concurrent_hashes() -> usize {
    DEFAULT_MAX_CONCURRENT_HASHES
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl EngineConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.chunk_size == Some(0) {
            return Err("chunk_size must be greater than zero".to_string());
        }
        if self.max_concurrent_hashes == Some(0) {
            return Err("max_concurrent_hashes must be greater than zero".to_string());
        }
        if self.batch_size == Some(0) {
            return Err("batch_size must be greater than zero".to_string());
        }
        let chunk = self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE) as u64;
        let max = self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE);
        if chunk > max {
            return Err(format!(
                "chunk_size ({chunk}) cannot exceed max_file_size ({max})"
            ));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Create a new config builder.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_concurrent_hashes: DEFAULT_MAX_CONCURRENT_HASHES,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::builder()
            .chunk_size(4096usize)
            .max_concurrent_hashes(2usize)
            .build()
            .unwrap();

        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.max_concurrent_hashes, 2);
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_builder_rejects_zero_values() {
        assert!(EngineConfig::builder().chunk_size(0usize).build().is_err());
        assert!(EngineConfig::builder().max_concurrent_hashes(0usize).build().is_err());
        assert!(EngineConfig::builder().batch_size(0usize).build().is_err());
    }

    #[test]
    fn test_builder_rejects_chunk_above_limit() {
        let result = EngineConfig::builder()
            .chunk_size(2048usize)
            .max_file_size(1024u64)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_matches_default() {
        assert_eq!(EngineConfig::builder().build().unwrap(), EngineConfig::default());
    }
}
