#![forbid(unsafe_code)]

use std::sync::Arc;

use crate::chunk::{Chunk, ChunkView};
use crate::convert::{cast_values, Primitive};
use crate::error::{ColumnarError, Result};
use crate::infer::{extract_column_type, infer_column_type};
use crate::types::{ColumnType, Value};

/// A named, null-aware column stored as a sequence of chunks.
///
/// Chunks are immutable and shared between clones through `Arc`. Each series owns its own
/// list of chunk windows, so operations that replace the list (such as [`Series::rechunk`])
/// never affect other series created from it.
#[derive(Clone, Debug)]
pub struct Series {
    name: String,
    dtype: ColumnType,
    chunks: Vec<ChunkView>,
    len: usize,
}

impl Series {
    /// Build a series from untyped values.
    ///
    /// `validity`, when given, must have one entry per value; `false` marks a null.
    /// With `infer_types` strings are parsed, so `["1", "2"]` becomes an `int64` column.
    /// Without it the values must already be well typed.
    pub fn from_values(
        name: impl Into<String>,
        values: &[Value],
        validity: Option<&[bool]>,
        infer_types: bool,
    ) -> Result<Self> {
        check_validity_len(values, validity)?;
        let dtype = if infer_types {
            infer_column_type(values)?
        } else {
            extract_column_type(values)?
        };
        Ok(Self::cast_from_values(name, values, validity, dtype))
    }

    /// Build a series of a known type, casting every value to it.
    ///
    /// Values that cannot be cast become nulls.
    pub fn from_values_with_type(
        name: impl Into<String>,
        values: &[Value],
        validity: Option<&[bool]>,
        dtype: ColumnType,
    ) -> Result<Self> {
        check_validity_len(values, validity)?;
        Ok(Self::cast_from_values(name, values, validity, dtype))
    }

    /// Build a one-element series from a single value.
    pub fn from_value(name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        Self::from_values(name, &[value.into()], None, false)
    }

    pub fn from_vec<T: Primitive>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::from_chunk(name, Chunk::from_vec(values))
    }

    pub fn from_options<T: Primitive>(name: impl Into<String>, values: Vec<Option<T>>) -> Self {
        Self::from_chunk(name, Chunk::from_options(values))
    }

    /// Wrap a prebuilt chunk without copying it.
    pub fn from_chunk(name: impl Into<String>, chunk: Chunk) -> Self {
        let dtype = chunk.column_type();
        let len = chunk.len();
        Self {
            name: name.into(),
            dtype,
            chunks: vec![ChunkView::new(Arc::new(chunk))],
            len,
        }
    }

    /// Assemble a series from several chunks of the same type.
    pub fn from_chunks(
        name: impl Into<String>,
        dtype: ColumnType,
        chunks: Vec<Chunk>,
    ) -> Result<Self> {
        if let Some(bad) = chunks.iter().find(|c| c.column_type() != dtype) {
            return Err(ColumnarError::TypeMismatch {
                expected: dtype,
                actual: bad.column_type(),
            });
        }
        let len = chunks.iter().map(Chunk::len).sum();
        Ok(Self {
            name: name.into(),
            dtype,
            chunks: chunks
                .into_iter()
                .map(|c| ChunkView::new(Arc::new(c)))
                .collect(),
            len,
        })
    }

    pub fn empty(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self::from_chunk(name, Chunk::empty(dtype))
    }

    pub(crate) fn from_views(name: String, dtype: ColumnType, chunks: Vec<ChunkView>) -> Self {
        let len = chunks.iter().map(ChunkView::len).sum();
        Self {
            name,
            dtype,
            chunks,
            len,
        }
    }

    fn cast_from_values(
        name: impl Into<String>,
        values: &[Value],
        validity: Option<&[bool]>,
        dtype: ColumnType,
    ) -> Self {
        let chunk = match dtype {
            ColumnType::String => cast_chunk::<Arc<str>>(values, validity),
            ColumnType::Float64 => cast_chunk::<f64>(values, validity),
            ColumnType::Boolean => cast_chunk::<bool>(values, validity),
            ColumnType::Int64 => cast_chunk::<i64>(values, validity),
        };
        Self::from_chunk(name, chunk)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// A copy of this series under another name, sharing its chunks.
    pub fn alias(&self, name: impl Into<String>) -> Series {
        Series {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn dtype(&self) -> ColumnType {
        self.dtype
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk_lengths(&self) -> Vec<usize> {
        self.chunks.iter().map(ChunkView::len).collect()
    }

    pub fn chunks(&self) -> &[ChunkView] {
        &self.chunks
    }

    pub fn null_count(&self) -> usize {
        self.chunks.iter().map(ChunkView::null_count).sum()
    }

    /// Map a logical index to `(chunk index, index within chunk)`.
    ///
    /// An index that falls on a chunk boundary belongs to the start of the next chunk.
    pub fn resolve_index(&self, index: usize) -> Option<(usize, usize)> {
        let mut remaining = index;
        for (chunk_idx, chunk) in self.chunks.iter().enumerate() {
            if remaining < chunk.len() {
                return Some((chunk_idx, remaining));
            }
            remaining -= chunk.len();
        }
        None
    }

    fn out_of_range(&self, index: usize) -> ColumnarError {
        ColumnarError::OutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len: self.len,
        }
    }

    /// The value at `index`, or `None` for a null.
    pub fn value(&self, index: usize) -> Result<Option<Value>> {
        let (chunk_idx, offset) = self
            .resolve_index(index)
            .ok_or_else(|| self.out_of_range(index))?;
        Ok(self.chunks[chunk_idx].value(offset))
    }

    pub(crate) fn get<T: Primitive>(&self, index: usize) -> Result<Option<T>> {
        let (chunk_idx, offset) = self
            .resolve_index(index)
            .ok_or_else(|| self.out_of_range(index))?;
        Ok(self.chunks[chunk_idx].get(offset))
    }

    pub fn is_valid(&self, index: usize) -> Result<bool> {
        let (chunk_idx, offset) = self
            .resolve_index(index)
            .ok_or_else(|| self.out_of_range(index))?;
        Ok(self.chunks[chunk_idx].is_valid(offset))
    }

    pub fn is_null(&self) -> Vec<bool> {
        self.validity_iter().map(|valid| !valid).collect()
    }

    pub fn is_not_null(&self) -> Vec<bool> {
        self.validity_iter().collect()
    }

    fn validity_iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.chunks
            .iter()
            .flat_map(|view| (0..view.len()).map(move |i| view.is_valid(i)))
    }

    /// All values in logical order, `None` marking nulls.
    pub fn iter(&self) -> impl Iterator<Item = Option<Value>> + '_ {
        self.chunks.iter().flat_map(|view| view.iter())
    }

    pub fn head(&self, n: usize) -> Result<Vec<Option<Value>>> {
        if n > self.len {
            return Err(ColumnarError::LengthMismatch {
                expected: self.len,
                actual: n,
            });
        }
        Ok(self.iter().take(n).collect())
    }

    pub fn tail(&self, n: usize) -> Result<Vec<Option<Value>>> {
        if n > self.len {
            return Err(ColumnarError::LengthMismatch {
                expected: self.len,
                actual: n,
            });
        }
        Ok(self.iter().skip(self.len - n).collect())
    }

    /// Coalesce all chunks into a single contiguous chunk.
    ///
    /// Other series sharing the old chunks keep seeing them unchanged.
    pub fn rechunk(&mut self) {
        if self.chunks.len() <= 1 {
            return;
        }

        log::debug!(
            "rechunking series {:?}: {} chunks into one of {} rows",
            self.name,
            self.chunks.len(),
            self.len
        );

        let mut values = Vec::with_capacity(self.len);
        let mut validity = Vec::with_capacity(self.len);
        for value in self.iter() {
            validity.push(value.is_some());
            values.push(value.unwrap_or(Value::Null));
        }

        let rebuilt =
            Self::cast_from_values(self.name.clone(), &values, Some(&validity), self.dtype);
        self.chunks = rebuilt.chunks;
    }
}

fn check_validity_len(values: &[Value], validity: Option<&[bool]>) -> Result<()> {
    match validity {
        Some(bits) if bits.len() != values.len() => Err(ColumnarError::LengthMismatch {
            expected: values.len(),
            actual: bits.len(),
        }),
        _ => Ok(()),
    }
}

fn cast_chunk<T: Primitive>(values: &[Value], validity: Option<&[bool]>) -> Chunk {
    let (casted, bits) = cast_values::<T>(values, validity);
    Chunk::new(T::into_data(casted), Some(bits))
        .expect("cast_values returns one validity bit per value")
}

/// Series compare by name, type and logical contents; chunk layout is ignored.
impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.dtype == other.dtype
            && self.len == other.len
            && self.iter().eq(other.iter())
    }
}
