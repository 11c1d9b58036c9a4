#![forbid(unsafe_code)]

use std::sync::Arc;

use crate::bitmap::BitVec;
use crate::convert::Primitive;
use crate::error::{ColumnarError, Result};
use crate::types::{ColumnType, Value};

/// Value buffer of a chunk, one variant per column type.
#[derive(Clone, Debug, PartialEq)]
pub enum ChunkData {
    String(Vec<Arc<str>>),
    Float64(Vec<f64>),
    Boolean(BitVec),
    Int64(Vec<i64>),
}

impl ChunkData {
    pub fn len(&self) -> usize {
        match self {
            ChunkData::String(v) => v.len(),
            ChunkData::Float64(v) => v.len(),
            ChunkData::Boolean(v) => v.len(),
            ChunkData::Int64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ChunkData::String(_) => ColumnType::String,
            ChunkData::Float64(_) => ColumnType::Float64,
            ChunkData::Boolean(_) => ColumnType::Boolean,
            ChunkData::Int64(_) => ColumnType::Int64,
        }
    }

    fn value(&self, index: usize) -> Value {
        match self {
            ChunkData::String(v) => Value::String(v[index].clone()),
            ChunkData::Float64(v) => Value::Float64(v[index]),
            ChunkData::Boolean(v) => Value::Boolean(v.get(index)),
            ChunkData::Int64(v) => Value::Int64(v[index]),
        }
    }
}

/// An immutable block of values of one type plus their validity.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    data: ChunkData,
    /// `None` when every element is valid.
    validity: Option<BitVec>,
}

impl Chunk {
    pub fn new(data: ChunkData, validity: Option<BitVec>) -> Result<Self> {
        if let Some(bits) = &validity {
            if bits.len() != data.len() {
                return Err(ColumnarError::LengthMismatch {
                    expected: data.len(),
                    actual: bits.len(),
                });
            }
        }
        let validity = validity.filter(|bits| !bits.all_true());
        Ok(Self { data, validity })
    }

    pub fn empty(column_type: ColumnType) -> Self {
        let data = match column_type {
            ColumnType::String => ChunkData::String(Vec::new()),
            ColumnType::Float64 => ChunkData::Float64(Vec::new()),
            ColumnType::Boolean => ChunkData::Boolean(BitVec::new()),
            ColumnType::Int64 => ChunkData::Int64(Vec::new()),
        };
        Self {
            data,
            validity: None,
        }
    }

    /// Build an all-valid chunk from native values.
    pub fn from_vec<T: Primitive>(values: Vec<T>) -> Self {
        Self {
            data: T::into_data(values),
            validity: None,
        }
    }

    /// Build a chunk from native values where `None` marks a null.
    pub fn from_options<T: Primitive>(values: Vec<Option<T>>) -> Self {
        let validity: BitVec = values.iter().map(Option::is_some).collect();
        let values = values
            .into_iter()
            .map(|v| v.unwrap_or_else(T::zero))
            .collect();
        Self {
            data: T::into_data(values),
            validity: (!validity.all_true()).then_some(validity),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    pub fn data(&self) -> &ChunkData {
        &self.data
    }

    pub fn validity(&self) -> Option<&BitVec> {
        self.validity.as_ref()
    }

    pub fn is_valid(&self, index: usize) -> bool {
        self.validity.as_ref().map_or(true, |bits| bits.get(index))
    }

    pub fn null_count(&self) -> usize {
        self.validity.as_ref().map_or(0, BitVec::count_zeros)
    }

    /// The element at `index`, or `None` when it is null.
    pub fn value(&self, index: usize) -> Option<Value> {
        self.is_valid(index).then(|| self.data.value(index))
    }

    pub fn get<T: Primitive>(&self, index: usize) -> Option<T> {
        if !self.is_valid(index) {
            return None;
        }
        T::get(&self.data, index)
    }
}

/// A contiguous window into a shared [`Chunk`].
///
/// Slicing a series only narrows windows; the chunk values themselves are never copied.
#[derive(Clone, Debug)]
pub struct ChunkView {
    chunk: Arc<Chunk>,
    offset: usize,
    len: usize,
}

impl ChunkView {
    pub(crate) fn new(chunk: Arc<Chunk>) -> Self {
        let len = chunk.len();
        Self {
            chunk,
            offset: 0,
            len,
        }
    }

    pub(crate) fn window(&self, offset: usize, len: usize) -> Self {
        debug_assert!(offset + len <= self.len, "chunk window out of bounds");
        Self {
            chunk: Arc::clone(&self.chunk),
            offset: self.offset + offset,
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Position of this window inside the backing chunk.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn chunk(&self) -> &Arc<Chunk> {
        &self.chunk
    }

    pub fn column_type(&self) -> ColumnType {
        self.chunk.column_type()
    }

    pub fn is_valid(&self, index: usize) -> bool {
        self.chunk.is_valid(self.offset + index)
    }

    pub fn null_count(&self) -> usize {
        match self.chunk.validity() {
            None => 0,
            Some(_) if self.offset == 0 && self.len == self.chunk.len() => {
                self.chunk.null_count()
            }
            Some(_) => (0..self.len).filter(|&i| !self.is_valid(i)).count(),
        }
    }

    pub fn value(&self, index: usize) -> Option<Value> {
        self.chunk.value(self.offset + index)
    }

    pub fn get<T: Primitive>(&self, index: usize) -> Option<T> {
        self.chunk.get(self.offset + index)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Value>> + '_ {
        (0..self.len).map(move |i| self.value(i))
    }
}
