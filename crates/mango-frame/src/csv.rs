//! Reading CSV text into a [`DataFrame`].
//!
//! Every field is read as a string. Each column's strings are then resolved to one column
//! type, parsing numbers and booleans when [`CsvOptions::infer_types`] is set.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use mango_columnar::{ColumnType, Series, Value};

use crate::error::{FrameError, Result};
use crate::frame::DataFrame;

#[derive(Clone, Debug)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Take column names from the first record. Otherwise columns are named
    /// `column_1`, `column_2`, ...
    pub has_header: bool,
    /// Parse fields into `int64`, `float64` or `bool` when every field in a column allows it.
    pub infer_types: bool,
    /// Field spellings read as null, such as `""` or `"NA"`. Matched after trimming.
    pub null_values: Vec<String>,
    /// Strip leading and trailing whitespace from headers and fields.
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            infer_types: true,
            null_values: Vec::new(),
            trim: false,
        }
    }
}

pub fn read_csv_str(input: &str, options: CsvOptions) -> Result<DataFrame> {
    read_csv(input.as_bytes(), options)
}

pub fn read_csv_path(path: impl AsRef<Path>, options: CsvOptions) -> Result<DataFrame> {
    let file = File::open(path)?;
    read_csv(BufReader::new(file), options)
}

pub fn read_csv<R: Read>(reader: R, options: CsvOptions) -> Result<DataFrame> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        // Headers are handled here so that header-less input and ragged rows share one path.
        .has_headers(false)
        .flexible(true)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let mut record = StringRecord::new();
    let mut record_index: u64 = 0;

    let mut names: Vec<String> = Vec::new();
    if options.has_header {
        let has_first = csv_reader
            .read_record(&mut record)
            .map_err(|e| map_csv_error(e, record_index + 1))?;
        if !has_first {
            return Err(FrameError::EmptyInput);
        }
        record_index += 1;
        names = record.iter().map(str::to_owned).collect();
    }

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
    let mut rows = 0usize;
    let mut ragged = 0usize;
    loop {
        record.clear();
        match csv_reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => record_index += 1,
            Err(e) => return Err(map_csv_error(e, record_index + 1)),
        }

        let expected = columns.len();
        if (options.has_header || rows > 0) && record.len() != expected {
            ragged += 1;
        }
        // A row wider than everything before it opens new columns, null-filled above.
        while columns.len() < record.len() {
            columns.push(vec![Value::Null; rows]);
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(match record.get(idx) {
                Some(field) => field_value(field, &options.null_values),
                None => Value::Null,
            });
        }
        rows += 1;
    }

    if ragged > 0 {
        log::warn!(
            "{ragged} of {rows} csv rows had a different field count than the rows before them; missing fields read as null"
        );
    }
    if !options.has_header && rows == 0 {
        return Err(FrameError::EmptyInput);
    }

    let series = columns
        .into_iter()
        .enumerate()
        .map(|(idx, values)| {
            let name = names
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("column_{}", idx + 1));
            build_series(name, &values, options.infer_types)
        })
        .collect::<Result<Vec<_>>>()?;

    DataFrame::new(series)
}

fn field_value(field: &str, null_values: &[String]) -> Value {
    if null_values.iter().any(|null| null.trim() == field.trim()) {
        Value::Null
    } else {
        Value::from(field)
    }
}

fn build_series(name: String, values: &[Value], infer_types: bool) -> Result<Series> {
    // Header-only input and all-null columns carry no type information; keep them as text.
    if values.iter().all(Value::is_null) {
        return Ok(Series::from_values_with_type(
            name,
            values,
            None,
            ColumnType::String,
        )?);
    }
    Ok(Series::from_values(name, values, None, infer_types)?)
}

fn map_csv_error(err: csv::Error, fallback_row: u64) -> FrameError {
    let reason = err.to_string();
    let pos = err.position().cloned();

    match err.into_kind() {
        csv::ErrorKind::Io(e) => FrameError::Io(e),
        _ => {
            let row = pos.map(|p| p.record() + 1).unwrap_or(fallback_row);
            FrameError::Csv { row, reason }
        }
    }
}
