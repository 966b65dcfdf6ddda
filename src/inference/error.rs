//! The inference error type.

use thiserror::Error;

use crate::persist::ReadError;

/// Why a prediction could not be produced.
///
/// This is the only error kind of the prediction pipeline. Callers are not
/// expected to branch on the variant; the detail is for the operator.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No classifier has been loaded yet.
    #[error("classifier has not been loaded")]
    ModelNotLoaded,

    /// The classifier artifact could not be loaded.
    #[error("classifier could not be loaded: {0}")]
    Load(#[from] ReadError),

    /// The record has the wrong number of columns.
    #[error("record has {found} columns, model expects {expected}")]
    ColumnCount { expected: usize, found: usize },

    /// A column name differs from the training schema.
    #[error("column {position} is `{found}`, model expects `{expected}`")]
    ColumnName {
        position: usize,
        expected: String,
        found: String,
    },

    /// The categorical tagging differs from the training schema.
    #[error("categorical positions {found:?} do not match model positions {expected:?}")]
    CategoricalPositions {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// A value's kind does not fit its column.
    #[error("column `{column}` expects a {expected} value, got `{found}`")]
    ValueType {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// A categorical value outside the training vocabulary.
    #[error("column `{column}` has unknown category `{value}`")]
    UnknownCategory { column: String, value: String },
}
