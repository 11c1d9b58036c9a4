//! Null-aware chunked columns for mango.
//!
//! This crate focuses on:
//! - A closed set of column types and an untyped [`Value`] used at API boundaries.
//! - Type inference for batches of untyped values (with or without string parsing).
//! - Chunked, immutable column storage with validity bitmaps and zero-copy slicing.
//! - Typed views ([`TypedSeries`]) and column operations (filter, take, rechunk, ...).

#![forbid(unsafe_code)]

mod bitmap;
mod bool_ops;
mod chunk;
mod convert;
mod error;
mod infer;
mod ops;
mod series;
mod typed;
mod types;

#[cfg(feature = "arrow")]
pub mod arrow;

pub use crate::bitmap::BitVec;
pub use crate::chunk::{Chunk, ChunkData, ChunkView};
pub use crate::convert::{cast_values, convert, Primitive};
pub use crate::error::{ColumnarError, Result};
pub use crate::infer::{
    extract_column_type, extracted_candidates, infer_column_type, inferred_candidates, TypeSet,
};
pub use crate::series::Series;
pub use crate::typed::TypedSeries;
pub use crate::types::{ColumnType, Value};
