//! Errors raised while reading a model artifact.

use std::path::PathBuf;

use thiserror::Error;

use crate::repr::gbdt::TreeShapeError;

/// Errors that can occur while reading and validating a model artifact.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The artifact file could not be opened or read.
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON for the model schema.
    #[error("malformed model artifact: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact parsed but violates a structural invariant.
    #[error("invalid model artifact: {0}")]
    Validation(String),

    /// A tree in the forest is structurally broken.
    #[error("invalid tree {index}: {source}")]
    Tree {
        index: usize,
        #[source]
        source: TreeShapeError,
    },
}
