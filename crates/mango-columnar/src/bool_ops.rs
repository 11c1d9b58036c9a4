#![forbid(unsafe_code)]

use crate::error::{ColumnarError, Result};
use crate::series::Series;
use crate::types::ColumnType;

impl Series {
    fn bools(&self) -> Result<impl Iterator<Item = bool> + '_> {
        if self.dtype() != ColumnType::Boolean {
            return Err(ColumnarError::TypeMismatch {
                expected: ColumnType::Boolean,
                actual: self.dtype(),
            });
        }
        // Nulls read as `false`.
        Ok(self
            .chunks()
            .iter()
            .flat_map(|view| (0..view.len()).map(move |i| view.get::<bool>(i).unwrap_or(false))))
    }

    /// Whether any element is `true`. Fails for non-boolean series.
    pub fn any(&self) -> Result<bool> {
        Ok(self.bools()?.any(|v| v))
    }

    /// Whether every element is `true`. Fails for non-boolean series.
    pub fn all(&self) -> Result<bool> {
        Ok(self.bools()?.all(|v| v))
    }
}
