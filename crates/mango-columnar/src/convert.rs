#![forbid(unsafe_code)]

//! Conversion of untyped values into the four native column element types.

use std::fmt;
use std::sync::Arc;

use crate::bitmap::BitVec;
use crate::chunk::ChunkData;
use crate::types::{ColumnType, Value};

const TRUE_SPELLINGS: [&str; 6] = ["true", "t", "1", "1.0", "yes", "y"];
const FALSE_SPELLINGS: [&str; 6] = ["false", "f", "0", "0.0", "no", "n"];

/// Parse one of the accepted boolean spellings, ignoring case and surrounding whitespace.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    let lowered = s.trim().to_ascii_lowercase();
    if TRUE_SPELLINGS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_SPELLINGS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Text form of a float; infinities carry an explicit sign (`+Inf`, `-Inf`).
fn float_to_text(v: f64) -> Arc<str> {
    if v.is_infinite() {
        Arc::from(if v > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        Arc::from(v.to_string())
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for std::sync::Arc<str> {}
    impl Sealed for f64 {}
    impl Sealed for bool {}
    impl Sealed for i64 {}
}

/// A native element type of a column.
///
/// Implemented by exactly `Arc<str>`, `f64`, `bool` and `i64`, one per [`ColumnType`].
pub trait Primitive: Clone + PartialEq + fmt::Debug + Send + Sync + 'static + sealed::Sealed {
    const COLUMN_TYPE: ColumnType;

    /// The value stored in null slots.
    fn zero() -> Self;

    /// Convert an untyped value, returning `None` when no conversion applies.
    fn from_value(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value;

    /// Build chunk storage from native values.
    fn into_data(values: Vec<Self>) -> ChunkData;

    /// Read the element at `index`, or `None` when `data` holds another type.
    fn get(data: &ChunkData, index: usize) -> Option<Self>;
}

impl Primitive for Arc<str> {
    const COLUMN_TYPE: ColumnType = ColumnType::String;

    fn zero() -> Self {
        Arc::from("")
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Boolean(v) => Some(Arc::from(if *v { "true" } else { "false" })),
            Value::Int64(v) => Some(Arc::from(v.to_string())),
            Value::Float64(v) => Some(float_to_text(*v)),
            Value::Null => None,
            Value::Optional(inner) => inner.as_deref().and_then(Self::from_value),
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn into_data(values: Vec<Self>) -> ChunkData {
        ChunkData::String(values)
    }

    fn get(data: &ChunkData, index: usize) -> Option<Self> {
        match data {
            ChunkData::String(values) => values.get(index).cloned(),
            _ => None,
        }
    }
}

impl Primitive for f64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Float64;

    fn zero() -> Self {
        0.0
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(*v),
            Value::Int64(v) => Some(*v as f64),
            Value::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::String(s) => s.parse().ok(),
            Value::Null => None,
            Value::Optional(inner) => inner.as_deref().and_then(Self::from_value),
        }
    }

    fn into_value(self) -> Value {
        Value::Float64(self)
    }

    fn into_data(values: Vec<Self>) -> ChunkData {
        ChunkData::Float64(values)
    }

    fn get(data: &ChunkData, index: usize) -> Option<Self> {
        match data {
            ChunkData::Float64(values) => values.get(index).copied(),
            _ => None,
        }
    }
}

impl Primitive for bool {
    const COLUMN_TYPE: ColumnType = ColumnType::Boolean;

    fn zero() -> Self {
        false
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(*v),
            Value::Int64(v) => Some(*v != 0),
            Value::String(s) => parse_bool(s),
            Value::Float64(_) | Value::Null => None,
            Value::Optional(inner) => inner.as_deref().and_then(Self::from_value),
        }
    }

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }

    fn into_data(values: Vec<Self>) -> ChunkData {
        ChunkData::Boolean(values.into_iter().collect())
    }

    fn get(data: &ChunkData, index: usize) -> Option<Self> {
        match data {
            ChunkData::Boolean(bits) if index < bits.len() => Some(bits.get(index)),
            _ => None,
        }
    }
}

impl Primitive for i64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Int64;

    fn zero() -> Self {
        0
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int64(v) => Some(*v),
            Value::Boolean(v) => Some(i64::from(*v)),
            Value::String(s) => s.parse().ok(),
            Value::Float64(_) | Value::Null => None,
            Value::Optional(inner) => inner.as_deref().and_then(Self::from_value),
        }
    }

    fn into_value(self) -> Value {
        Value::Int64(self)
    }

    fn into_data(values: Vec<Self>) -> ChunkData {
        ChunkData::Int64(values)
    }

    fn get(data: &ChunkData, index: usize) -> Option<Self> {
        match data {
            ChunkData::Int64(values) => values.get(index).copied(),
            _ => None,
        }
    }
}

/// Convert one value to `T`.
///
/// `None` means the conversion does not apply (unsupported pair, parse failure or null);
/// callers that need a placeholder use [`Primitive::zero`].
pub fn convert<T: Primitive>(value: &Value) -> Option<T> {
    T::from_value(value)
}

/// Cast a batch element-wise to `T`.
///
/// Elements already marked invalid in `validity` are skipped. Elements that fail to convert
/// become nulls; the batch as a whole never fails.
pub fn cast_values<T: Primitive>(values: &[Value], validity: Option<&[bool]>) -> (Vec<T>, BitVec) {
    let mut out = Vec::with_capacity(values.len());
    let mut out_validity = BitVec::with_capacity_bits(values.len());
    let mut degraded = 0usize;

    for (idx, value) in values.iter().enumerate() {
        let input_valid = validity.and_then(|v| v.get(idx).copied()).unwrap_or(true);
        if !input_valid {
            out.push(T::zero());
            out_validity.push(false);
            continue;
        }

        match T::from_value(value) {
            Some(v) => {
                out.push(v);
                out_validity.push(true);
            }
            None => {
                if !value.is_null() {
                    degraded += 1;
                }
                out.push(T::zero());
                out_validity.push(false);
            }
        }
    }

    if degraded > 0 {
        log::debug!(
            "{degraded} of {} values could not be converted to {}; stored as null",
            values.len(),
            T::COLUMN_TYPE
        );
    }

    (out, out_validity)
}
