use mango_columnar::ColumnarError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FrameError>;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Columnar(#[from] ColumnarError),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("column {name} has {actual} rows, expected {expected}")]
    HeightMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("csv input was empty")]
    EmptyInput,

    #[error("csv parse error at row {row}: {reason}")]
    Csv { row: u64, reason: String },

    #[error("apply failed at row {row}: {source}")]
    Apply {
        row: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "arrow")]
    #[error(transparent)]
    Arrow(#[from] arrow_schema::ArrowError),

    #[cfg(feature = "arrow")]
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
}
