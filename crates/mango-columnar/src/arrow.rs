#![forbid(unsafe_code)]

//! Conversions between chunks and Arrow arrays.

use std::sync::Arc;

use arrow_array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, LargeStringArray, StringArray,
};
use arrow_schema::DataType;

use crate::bitmap::BitVec;
use crate::chunk::{Chunk, ChunkData};
use crate::error::{ColumnarError, Result};
use crate::series::Series;
use crate::types::ColumnType;

pub fn arrow_data_type(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::String => DataType::Utf8,
        ColumnType::Float64 => DataType::Float64,
        ColumnType::Boolean => DataType::Boolean,
        ColumnType::Int64 => DataType::Int64,
    }
}

/// The column type an Arrow array of `data_type` is read into.
pub fn column_type_from_arrow(data_type: &DataType) -> Result<ColumnType> {
    match data_type {
        DataType::Utf8 | DataType::LargeUtf8 => Ok(ColumnType::String),
        DataType::Float64 => Ok(ColumnType::Float64),
        DataType::Boolean => Ok(ColumnType::Boolean),
        DataType::Int64 => Ok(ColumnType::Int64),
        other => Err(ColumnarError::UnsupportedType(other.to_string())),
    }
}

fn downcast<'a, A: 'static>(array: &'a dyn Array) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| ColumnarError::UnsupportedType(array.data_type().to_string()))
}

/// Copy an Arrow array into a chunk.
///
/// Only the four physical types backing [`ColumnType`] are accepted.
pub fn chunk_from_arrow(array: &dyn Array) -> Result<Chunk> {
    let len = array.len();
    let validity: BitVec = (0..len).map(|i| array.is_valid(i)).collect();

    let data = match array.data_type() {
        DataType::Utf8 => {
            let arr = downcast::<StringArray>(array)?;
            ChunkData::String(
                (0..len)
                    .map(|i| {
                        if arr.is_valid(i) {
                            Arc::<str>::from(arr.value(i))
                        } else {
                            Arc::<str>::from("")
                        }
                    })
                    .collect(),
            )
        }
        DataType::LargeUtf8 => {
            let arr = downcast::<LargeStringArray>(array)?;
            ChunkData::String(
                (0..len)
                    .map(|i| {
                        if arr.is_valid(i) {
                            Arc::<str>::from(arr.value(i))
                        } else {
                            Arc::<str>::from("")
                        }
                    })
                    .collect(),
            )
        }
        DataType::Float64 => {
            let arr = downcast::<Float64Array>(array)?;
            ChunkData::Float64(arr.values().to_vec())
        }
        DataType::Int64 => {
            let arr = downcast::<Int64Array>(array)?;
            ChunkData::Int64(arr.values().to_vec())
        }
        DataType::Boolean => {
            let arr = downcast::<BooleanArray>(array)?;
            ChunkData::Boolean((0..len).map(|i| arr.value(i)).collect())
        }
        other => return Err(ColumnarError::UnsupportedType(other.to_string())),
    };

    Chunk::new(data, Some(validity))
}

/// Copy several Arrow arrays of one type into a multi-chunk series, one chunk per array.
pub fn series_from_arrow_chunks(
    name: impl Into<String>,
    data_type: &DataType,
    arrays: &[ArrayRef],
) -> Result<Series> {
    let dtype = column_type_from_arrow(data_type)?;
    if arrays.is_empty() {
        return Ok(Series::empty(name, dtype));
    }
    let chunks = arrays
        .iter()
        .map(|array| chunk_from_arrow(array.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Series::from_chunks(name, dtype, chunks)
}

pub fn series_from_arrow(name: impl Into<String>, array: &dyn Array) -> Result<Series> {
    Ok(Series::from_chunk(name, chunk_from_arrow(array)?))
}

/// Materialize a series as one Arrow array, concatenating its chunks.
pub fn series_to_arrow(series: &Series) -> ArrayRef {
    let views = series.chunks();
    match series.dtype() {
        ColumnType::String => {
            let values: Vec<Option<Arc<str>>> = views
                .iter()
                .flat_map(|v| (0..v.len()).map(move |i| v.get::<Arc<str>>(i)))
                .collect();
            Arc::new(StringArray::from_iter(values.iter().map(|v| v.as_deref())))
        }
        ColumnType::Float64 => Arc::new(Float64Array::from_iter(
            views
                .iter()
                .flat_map(|v| (0..v.len()).map(move |i| v.get::<f64>(i))),
        )),
        ColumnType::Boolean => {
            // `BooleanArray::from_iter` needs an exact upper bound, which `flat_map` lacks.
            let values: Vec<Option<bool>> = views
                .iter()
                .flat_map(|v| (0..v.len()).map(move |i| v.get::<bool>(i)))
                .collect();
            Arc::new(BooleanArray::from(values))
        }
        ColumnType::Int64 => Arc::new(Int64Array::from_iter(
            views
                .iter()
                .flat_map(|v| (0..v.len()).map(move |i| v.get::<i64>(i))),
        )),
    }
}
