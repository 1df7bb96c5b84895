use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use thiserror::Error;

/// Errors raised by measures and the table helpers they use.
///
/// Only [`MeasureError::NotImplemented`] originates in the base contract.
/// The remaining variants exist so concrete measures can report bad inputs
/// without panicking.
#[derive(Debug, Error)]
pub enum MeasureError {
    /// `estimate` was called on a measure that never overrode it.
    #[error("measure '{measure}' does not implement estimate")]
    NotImplemented { measure: String },

    /// The number of input tables differs from the number of required datasets.
    #[error("measure '{measure}' expects {expected} input table(s), got {found}")]
    InputCount {
        measure: String,
        expected: usize,
        found: usize,
    },

    #[error("input table has no column '{column}'")]
    MissingColumn { column: String },

    #[error("column '{column}' has type {found:?}, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        found: DataType,
    },

    #[error(transparent)]
    Arrow(#[from] ArrowError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MeasureError>;
