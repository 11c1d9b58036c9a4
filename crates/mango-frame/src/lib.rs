//! Data frames for mango: named collections of [`mango_columnar::Series`] with row access,
//! row-wise functions, CSV input and a boxed text rendering.
//!
//! Parquet I/O is available behind the `arrow` feature.

#![forbid(unsafe_code)]

mod display;
mod error;
mod frame;

pub mod csv;

#[cfg(feature = "arrow")]
pub mod arrow;
#[cfg(feature = "arrow")]
pub mod parquet;

pub use crate::csv::{read_csv, read_csv_path, read_csv_str, CsvOptions};
pub use crate::display::{DisplayOptions, FrameDisplay};
pub use crate::error::{FrameError, Result};
pub use crate::frame::{DataFrame, Row};

pub use mango_columnar::{ColumnType, Series, TypedSeries, Value};
