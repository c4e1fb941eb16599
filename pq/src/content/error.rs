//! Content error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or looking up topics
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Topic not found: {id}")]
    NotFound { id: String },

    #[error("No topics defined")]
    Empty,

    #[error("Duplicate topic id: {id}")]
    DuplicateTopic { id: String },

    #[error("Invalid topic {id}: {reason}")]
    Invalid { id: String, reason: String },

    #[error("Failed to parse topics: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to read topics file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
