use std::collections::{BTreeMap, HashSet};

use mango_columnar::{ColumnarError, Series, Value};

use crate::error::{FrameError, Result};

/// One row keyed by column name. Nulls are `None`.
pub type Row = BTreeMap<String, Option<Value>>;

/// An ordered collection of equally long, uniquely named columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<Series>,
}

impl DataFrame {
    pub fn new(columns: Vec<Series>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(FrameError::DuplicateColumn(column.name().to_owned()));
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(FrameError::HeightMismatch {
                    name: bad.name().to_owned(),
                    expected,
                    actual: bad.len(),
                });
            }
        }

        Ok(Self { columns })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Series> {
        self.columns
    }

    pub fn column(&self, name: &str) -> Result<&Series> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_owned()))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Series::name).collect()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows; zero for a frame without columns.
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Series::len)
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// A frame with the named columns, in the order given.
    ///
    /// Columns are shared with `self`, not copied.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<DataFrame> {
        let columns = names
            .iter()
            .map(|name| self.column(name.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        DataFrame::new(columns)
    }

    fn check_row(&self, index: usize) -> Result<()> {
        let height = self.height();
        if index >= height {
            return Err(ColumnarError::OutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: height,
            }
            .into());
        }
        Ok(())
    }

    /// The values of row `index`, in column order.
    pub fn row_values(&self, index: usize) -> Result<Vec<Option<Value>>> {
        self.check_row(index)?;
        self.columns
            .iter()
            .map(|c| c.value(index).map_err(FrameError::from))
            .collect()
    }

    /// Row `index` keyed by column name.
    pub fn row(&self, index: usize) -> Result<Row> {
        self.check_row(index)?;
        self.columns
            .iter()
            .map(|c| -> Result<(String, Option<Value>)> {
                Ok((c.name().to_owned(), c.value(index)?))
            })
            .collect()
    }

    /// Run `f` over every row and collect the results into an unnamed series.
    ///
    /// The column type is inferred: integer and float results widen to `f64`, and strings
    /// that parse as numbers or booleans are converted. Nulls are allowed anywhere. A frame
    /// without rows has nothing to take a type from and fails with a type inference error.
    pub fn apply<F>(&self, mut f: F) -> Result<Series>
    where
        F: FnMut(&Row) -> Value,
    {
        self.try_apply(|row| Ok::<_, std::convert::Infallible>(f(row)))
    }

    /// Like [`DataFrame::apply`], but stops at the first row for which `f` fails.
    pub fn try_apply<F, E>(&self, mut f: F) -> Result<Series>
    where
        F: FnMut(&Row) -> std::result::Result<Value, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let height = self.height();
        let mut results = Vec::with_capacity(height);
        for index in 0..height {
            let row = self.row(index)?;
            let value = f(&row).map_err(|err| FrameError::Apply {
                row: index,
                source: err.into(),
            })?;
            results.push(value);
        }
        Ok(Series::from_values("", &results, None, true)?)
    }

    /// Replace columns that share a name with one of `columns` and append the rest.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Series>) -> Result<Self> {
        for column in columns {
            if !self.columns.is_empty() && column.len() != self.height() {
                return Err(FrameError::HeightMismatch {
                    name: column.name().to_owned(),
                    expected: self.height(),
                    actual: column.len(),
                });
            }
            match self.columns.iter_mut().find(|c| c.name() == column.name()) {
                Some(existing) => *existing = column,
                None => self.columns.push(column),
            }
        }
        Ok(self)
    }

    /// Coalesce every column into a single chunk.
    pub fn rechunk(&mut self) {
        for column in &mut self.columns {
            column.rechunk();
        }
    }
}
