//! Error types for per-file analysis and hashing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Errors that can occur while inspecting a single file.
///
/// Every variant carries the path that caused it. Batch operations never
/// propagate these; they turn them into [`SkippedFile`] records instead.
#[derive(Debug, Error)]
pub enum FileError {
    /// Path does not exist.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file.
    #[error("Not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// File exceeds the configured hashing limit.
    #[error("File too large to hash: {path} ({size} bytes, limit {max_size})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Reading file contents failed mid-hash.
    #[error("Hash calculation failed for {path}: {source}")]
    HashCalculationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata could not be read.
    #[error("Cannot get file size for {path}: {source}")]
    CannotGetFileSize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path cannot be interpreted (e.g. it has no file name).
    #[error("Invalid file format at {path}: {reason}")]
    InvalidFileFormat { path: PathBuf, reason: String },
}

impl FileError {
    /// Create an error from a failed read, with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::HashCalculationFailed { path, source },
        }
    }

    /// Create an error from a failed metadata lookup, with path context.
    pub fn metadata(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::CannotGetFileSize { path, source },
        }
    }

    /// The path this error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::FileNotFound { path }
            | Self::NotAFile { path }
            | Self::PermissionDenied { path }
            | Self::FileTooLarge { path, .. }
            | Self::HashCalculationFailed { path, .. }
            | Self::CannotGetFileSize { path, .. }
            | Self::InvalidFileFormat { path, .. } => path,
        }
    }

    /// The fieldless kind of this error.
    pub fn kind(&self) -> FileErrorKind {
        match self {
            Self::FileNotFound { .. } => FileErrorKind::FileNotFound,
            Self::NotAFile { .. } => FileErrorKind::NotAFile,
            Self::PermissionDenied { .. } => FileErrorKind::PermissionDenied,
            Self::FileTooLarge { .. } => FileErrorKind::FileTooLarge,
            Self::HashCalculationFailed { .. } => FileErrorKind::HashCalculationFailed,
            Self::CannotGetFileSize { .. } => FileErrorKind::CannotGetFileSize,
            Self::InvalidFileFormat { .. } => FileErrorKind::InvalidFileFormat,
        }
    }
}

/// Kind of file error, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FileErrorKind {
    FileNotFound,
    NotAFile,
    PermissionDenied,
    FileTooLarge,
    HashCalculationFailed,
    CannotGetFileSize,
    InvalidFileFormat,
}

/// A file that was left out of a batch result, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    /// Path that was skipped.
    pub path: PathBuf,
    /// Kind of failure.
    pub kind: FileErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl From<&FileError> for SkippedFile {
    fn from(err: &FileError) -> Self {
        Self {
            path: err.path().to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<FileError> for SkippedFile {
    fn from(err: FileError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_maps_kinds() {
        let err = FileError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, FileError::PermissionDenied { .. }));

        let err = FileError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, FileError::FileNotFound { .. }));

        let err = FileError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof"),
        );
        assert_eq!(err.kind(), FileErrorKind::HashCalculationFailed);
    }

    #[test]
    fn test_metadata_falls_back_to_size_error() {
        let err = FileError::metadata("/x", std::io::Error::other("boom"));
        assert_eq!(err.kind(), FileErrorKind::CannotGetFileSize);
        assert_eq!(err.path(), Path::new("/x"));
    }

    #[test]
    fn test_skipped_file_from_error() {
        let err = FileError::FileTooLarge {
            path: PathBuf::from("/big.iso"),
            size: 10,
            max_size: 5,
        };
        let skipped = SkippedFile::from(&err);
        assert_eq!(skipped.path, PathBuf::from("/big.iso"));
        assert_eq!(skipped.kind, FileErrorKind::FileTooLarge);
        assert!(skipped.message.contains("limit 5"));
    }
}
