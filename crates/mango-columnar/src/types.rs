#![forbid(unsafe_code)]

use std::fmt;
use std::sync::Arc;

/// Element type of a column.
///
/// The set is closed: every column holds exactly one of these for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnType {
    String,
    Float64,
    Boolean,
    Int64,
}

impl ColumnType {
    /// All column types, most specific first.
    ///
    /// Type resolution picks the first entry that every value of a batch can be stored as.
    pub const PREFERENCE: [ColumnType; 4] = [
        ColumnType::Boolean,
        ColumnType::Int64,
        ColumnType::Float64,
        ColumnType::String,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColumnType::String => "utf8",
            ColumnType::Float64 => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::Int64 => "int64",
        }
    }

    /// Compact name used in table headers.
    pub fn short_name(self) -> &'static str {
        match self {
            ColumnType::String => "str",
            ColumnType::Float64 => "f64",
            ColumnType::Boolean => "bool",
            ColumnType::Int64 => "i64",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An untyped value crossing the API boundary.
///
/// Values never live inside a column: they are classified, cast to the column's type and
/// split into a value buffer plus validity when a column is built.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    String(Arc<str>),
    Float64(f64),
    Boolean(bool),
    Int64(i64),
    /// A presence wrapper. `Optional(None)` behaves like [`Value::Null`].
    Optional(Option<Box<Value>>),
}

impl Value {
    pub fn some(value: impl Into<Value>) -> Self {
        Value::Optional(Some(Box::new(value.into())))
    }

    pub fn none() -> Self {
        Value::Optional(None)
    }

    /// Strip any `Optional` wrappers. Absent optionals resolve to [`Value::Null`].
    pub fn resolved(&self) -> &Value {
        match self {
            Value::Optional(Some(inner)) => inner.resolved(),
            Value::Optional(None) => &Value::Null,
            other => other,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.resolved(), Value::Null)
    }

    /// The column type this value natively belongs to, if any.
    pub fn native_type(&self) -> Option<ColumnType> {
        match self.resolved() {
            Value::String(_) => Some(ColumnType::String),
            Value::Float64(_) => Some(ColumnType::Float64),
            Value::Boolean(_) => Some(ColumnType::Boolean),
            Value::Int64(_) => Some(ColumnType::Int64),
            Value::Null | Value::Optional(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(Arc::from(value))
    }
}

impl From<Arc<str>> for Value {
    fn from(value: Arc<str>) -> Self {
        Value::String(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int64(i64::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::Optional(value.map(|v| Box::new(v.into())))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved() {
            Value::String(s) => f.write_str(s),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Null | Value::Optional(_) => f.write_str("null"),
        }
    }
}
