//! Errors raised while setting up or driving the engine.

use thiserror::Error;

/// Engine-level errors. Per-file failures use [`fileintel_core::FileError`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The bounded hashing pool could not be created.
    #[error("Failed to build hashing pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A pattern rule could not be compiled.
    #[error("Invalid pattern rule {id}: {source}")]
    Pattern {
        id: String,
        #[source]
        source: globset::Error,
    },

    /// A background task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl EngineError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
