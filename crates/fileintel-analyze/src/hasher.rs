//! Chunked BLAKE3 content hashing.

use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;

use blake3::Hasher;

use fileintel_core::{ContentHash, EngineConfig, FileError};

/// Computes content digests for files, reading them in bounded chunks.
#[derive(Debug, Clone)]
pub struct FileHasher {
    chunk_size: usize,
    max_file_size: u64,
}

impl FileHasher {
    /// Create a hasher with the default 1 MiB chunks and 1 GiB limit.
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Create a hasher using the limits from an engine config.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            chunk_size: config.chunk_size.max(1),
            max_file_size: config.max_file_size,
        }
    }

    /// Largest file this hasher will accept.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Hash a file's full contents.
    ///
    /// At most one chunk of the file is held in memory at a time.
    pub fn hash(&self, path: &Path) -> Result<ContentHash, FileError> {
        let metadata = fs::metadata(path).map_err(|e| FileError::metadata(path, e))?;
        if !metadata.is_file() {
            return Err(FileError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let size = metadata.len();
        if size > self.max_file_size {
            return Err(FileError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                max_size: self.max_file_size,
            });
        }

        let mut file = File::open(path).map_err(|e| FileError::io(path, e))?;
        let mut hasher = Hasher::new();

        // Small files don't need a full chunk buffer.
        let buffer_len = usize::try_from(size)
            .map_or(self.chunk_size, |s| s.clamp(1, self.chunk_size));
        let mut buffer = vec![0u8; buffer_len];

        loop {
            match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => {
                    hasher.update(&buffer[..n]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(FileError::HashCalculationFailed {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }

        tracing::trace!(path = %path.display(), size, "hashed file");
        Ok(ContentHash::new(*hasher.finalize().as_bytes()))
    }
}

impl Default for FileHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash an in-memory byte slice with the same algorithm as [`FileHasher`].
pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    ContentHash::new(*blake3::hash(bytes).as_bytes())
}
