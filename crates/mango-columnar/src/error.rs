use thiserror::Error;

use crate::types::ColumnType;

pub type Result<T> = std::result::Result<T, ColumnarError>;

/// Structural failures of column construction and column operations.
///
/// Per-element conversion failures are not errors: they become nulls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColumnarError {
    #[error("cannot infer column type: {0}")]
    TypeInference(String),

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: ColumnType,
        actual: ColumnType,
    },

    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: i64, len: usize },

    #[error("slice with offset {offset} and length {length} is out of range for length {len}")]
    SliceOutOfRange {
        offset: i64,
        length: usize,
        len: usize,
    },

    #[error("length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("mask must be of type bool, got {0}")]
    MaskNotBoolean(ColumnType),

    #[error("unsupported data type: {0}")]
    UnsupportedType(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
