#![forbid(unsafe_code)]

//! Column type resolution for batches of untyped values.
//!
//! Every value contributes a set of candidate types; the batch resolves to the most
//! specific type (see [`ColumnType::PREFERENCE`]) that is a candidate for all of its values.

use crate::convert::parse_bool;
use crate::error::{ColumnarError, Result};
use crate::types::{ColumnType, Value};

/// A set of column types, stored as a bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeSet(u8);

impl TypeSet {
    pub const EMPTY: TypeSet = TypeSet(0);
    pub const ALL: TypeSet = TypeSet(0b1111);

    fn bit(ty: ColumnType) -> u8 {
        match ty {
            ColumnType::String => 0b0001,
            ColumnType::Float64 => 0b0010,
            ColumnType::Boolean => 0b0100,
            ColumnType::Int64 => 0b1000,
        }
    }

    pub fn of(types: &[ColumnType]) -> Self {
        types.iter().fold(Self::EMPTY, |set, ty| set.with(*ty))
    }

    #[must_use]
    pub fn with(self, ty: ColumnType) -> Self {
        TypeSet(self.0 | Self::bit(ty))
    }

    pub fn contains(self, ty: ColumnType) -> bool {
        self.0 & Self::bit(ty) != 0
    }

    #[must_use]
    pub fn intersect(self, other: TypeSet) -> Self {
        TypeSet(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The most specific member of the set.
    pub fn preferred(self) -> Option<ColumnType> {
        ColumnType::PREFERENCE
            .iter()
            .copied()
            .find(|ty| self.contains(*ty))
    }
}

/// Types a value could be stored as when string parsing is allowed.
pub fn inferred_candidates(value: &Value) -> TypeSet {
    match value {
        Value::String(s) => {
            let mut set = TypeSet::EMPTY.with(ColumnType::String);
            if s.parse::<i64>().is_ok() {
                set = set.with(ColumnType::Int64);
            }
            if s.parse::<f64>().is_ok() {
                set = set.with(ColumnType::Float64);
            }
            if parse_bool(s).is_some() {
                set = set.with(ColumnType::Boolean);
            }
            set
        }
        Value::Float64(_) => TypeSet::of(&[ColumnType::Float64]),
        Value::Boolean(_) => TypeSet::of(&[
            ColumnType::Boolean,
            ColumnType::Int64,
            ColumnType::Float64,
        ]),
        Value::Int64(_) => TypeSet::of(&[ColumnType::Int64, ColumnType::Float64]),
        Value::Null | Value::Optional(None) => TypeSet::ALL,
        Value::Optional(Some(inner)) => inferred_candidates(inner),
    }
}

/// Types a value could be stored as without any coercion: just its own.
pub fn extracted_candidates(value: &Value) -> TypeSet {
    match value.native_type() {
        Some(ty) => TypeSet::EMPTY.with(ty),
        None => TypeSet::ALL,
    }
}

fn resolve(values: &[Value], candidates: fn(&Value) -> TypeSet) -> Result<ColumnType> {
    if values.is_empty() {
        return Err(ColumnarError::TypeInference(
            "cannot infer a type from an empty batch".to_owned(),
        ));
    }

    let mut common = TypeSet::ALL;
    for (idx, value) in values.iter().enumerate() {
        common = common.intersect(candidates(value));
        if common.is_empty() {
            return Err(ColumnarError::TypeInference(format!(
                "no type is shared by all values (first conflict at position {idx}: {value:?})"
            )));
        }
    }

    common
        .preferred()
        .ok_or_else(|| ColumnarError::TypeInference("no preferred type in common".to_owned()))
}

/// Resolve the column type of a batch, parsing strings into numbers and booleans
/// where every value allows it.
///
/// ```
/// use mango_columnar::{infer_column_type, ColumnType, Value};
///
/// let values = vec![Value::from("1"), Value::from("2"), Value::Null];
/// assert_eq!(infer_column_type(&values).unwrap(), ColumnType::Int64);
/// ```
pub fn infer_column_type(values: &[Value]) -> Result<ColumnType> {
    resolve(values, inferred_candidates)
}

/// Resolve the column type of a batch whose values are already well typed.
///
/// Unlike [`infer_column_type`] no string is ever parsed.
pub fn extract_column_type(values: &[Value]) -> Result<ColumnType> {
    resolve(values, extracted_candidates)
}
