#![forbid(unsafe_code)]

use crate::error::{ColumnarError, Result};
use crate::series::Series;
use crate::types::{ColumnType, Value};

impl Series {
    /// A zero-copy view of `length` elements starting at `offset`.
    ///
    /// A negative `offset` counts from the end, so `slice(-1, 1)` is the last element.
    pub fn slice(&self, offset: i64, length: usize) -> Result<Series> {
        let len = self.len();
        let out_of_range = || ColumnarError::SliceOutOfRange {
            offset,
            length,
            len,
        };

        let start = if offset < 0 {
            offset + len as i64
        } else {
            offset
        };
        if length > len || start < 0 || start as usize + length > len {
            return Err(out_of_range());
        }

        let mut skip = start as usize;
        let mut remaining = length;
        let mut windows = Vec::new();
        for view in self.chunks() {
            if remaining == 0 {
                break;
            }
            if skip >= view.len() {
                skip -= view.len();
                continue;
            }
            let take = (view.len() - skip).min(remaining);
            windows.push(view.window(skip, take));
            skip = 0;
            remaining -= take;
        }

        Ok(Series::from_views(
            self.name().to_owned(),
            self.dtype(),
            windows,
        ))
    }

    /// Keep the elements whose mask entry is `true`. Null mask entries count as `false`.
    ///
    /// The result is newly allocated and keeps this series' name and type.
    pub fn filter(&self, mask: &Series) -> Result<Series> {
        if mask.len() != self.len() {
            return Err(ColumnarError::LengthMismatch {
                expected: self.len(),
                actual: mask.len(),
            });
        }
        if mask.dtype() != ColumnType::Boolean {
            return Err(ColumnarError::MaskNotBoolean(mask.dtype()));
        }

        let mut values = Vec::new();
        let mut validity = Vec::new();
        for (keep, value) in mask.iter().zip(self.iter()) {
            if keep == Some(Value::Boolean(true)) {
                validity.push(value.is_some());
                values.push(value.unwrap_or(Value::Null));
            }
        }

        Series::from_values_with_type(self.name(), &values, Some(&validity), self.dtype())
    }

    /// Gather elements by position. A null index yields a null element.
    pub fn take(&self, indices: &Series) -> Result<Series> {
        if indices.dtype() != ColumnType::Int64 {
            return Err(ColumnarError::TypeMismatch {
                expected: ColumnType::Int64,
                actual: indices.dtype(),
            });
        }
        if indices.len() > self.len() {
            return Err(ColumnarError::LengthMismatch {
                expected: self.len(),
                actual: indices.len(),
            });
        }

        let mut values = Vec::with_capacity(indices.len());
        let mut validity = Vec::with_capacity(indices.len());
        for index in indices.iter() {
            let Some(Value::Int64(index)) = index else {
                values.push(Value::Null);
                validity.push(false);
                continue;
            };
            let position = usize::try_from(index).map_err(|_| ColumnarError::OutOfRange {
                index,
                len: self.len(),
            })?;
            let value = self.value(position)?;
            validity.push(value.is_some());
            values.push(value.unwrap_or(Value::Null));
        }

        Series::from_values_with_type(self.name(), &values, Some(&validity), self.dtype())
    }

    /// Every `n`th element, starting with the first.
    pub fn take_every(&self, n: usize) -> Result<Series> {
        match n {
            0 => Err(ColumnarError::InvalidArgument(
                "take_every step must be at least 1".to_owned(),
            )),
            1 => Ok(self.clone()),
            _ => {
                let mask: Vec<bool> = (0..self.len()).map(|i| i % n == 0).collect();
                self.filter(&Series::from_vec("", mask))
            }
        }
    }
}
