#![forbid(unsafe_code)]

use std::marker::PhantomData;

use crate::convert::Primitive;
use crate::error::{ColumnarError, Result};
use crate::series::Series;
use crate::types::Value;

/// A [`Series`] known to hold elements of type `T`.
///
/// Every constructor checks the stored type, so a `TypedSeries<T>` can read `T` values
/// without further checks.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedSeries<T: Primitive> {
    series: Series,
    _marker: PhantomData<T>,
}

impl<T: Primitive> TypedSeries<T> {
    pub fn new(series: Series) -> Result<Self> {
        let typed = Self {
            series,
            _marker: PhantomData,
        };
        typed.validate()?;
        Ok(typed)
    }

    pub fn from_vec(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::new(Series::from_vec(name, values))
            .expect("a series built from Vec<T> always holds T")
    }

    pub fn from_options(name: impl Into<String>, values: Vec<Option<T>>) -> Self {
        Self::new(Series::from_options(name, values))
            .expect("a series built from Vec<Option<T>> always holds T")
    }

    /// Build from native values plus a validity list (`false` marks a null).
    pub fn from_vec_with_validity(
        name: impl Into<String>,
        values: Vec<T>,
        validity: Option<&[bool]>,
    ) -> Result<Self> {
        let values: Vec<Value> = values.into_iter().map(T::into_value).collect();
        Self::new(Series::from_values_with_type(
            name,
            &values,
            validity,
            T::COLUMN_TYPE,
        )?)
    }

    /// Check that the backing series stores `T`.
    pub fn validate(&self) -> Result<()> {
        if self.series.dtype() != T::COLUMN_TYPE {
            return Err(ColumnarError::TypeMismatch {
                expected: T::COLUMN_TYPE,
                actual: self.series.dtype(),
            });
        }
        Ok(())
    }

    pub fn value(&self, index: usize) -> Result<Option<T>> {
        self.series.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
        self.series
            .chunks()
            .iter()
            .flat_map(|view| (0..view.len()).map(move |i| view.get::<T>(i)))
    }

    pub fn name(&self) -> &str {
        self.series.name()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn as_series(&self) -> &Series {
        &self.series
    }

    pub fn into_series(self) -> Series {
        self.series
    }
}

impl<T: Primitive> TryFrom<Series> for TypedSeries<T> {
    type Error = ColumnarError;

    fn try_from(series: Series) -> Result<Self> {
        Self::new(series)
    }
}

impl<T: Primitive> From<TypedSeries<T>> for Series {
    fn from(typed: TypedSeries<T>) -> Self {
        typed.series
    }
}

impl<T: Primitive> AsRef<Series> for TypedSeries<T> {
    fn as_ref(&self) -> &Series {
        &self.series
    }
}
