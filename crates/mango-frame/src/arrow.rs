//! Conversions between data frames and Arrow record batches.

use std::sync::Arc;

use arrow_array::{ArrayRef, RecordBatch};
use arrow_schema::{Field, Schema, SchemaRef};
use mango_columnar::arrow::{arrow_data_type, series_from_arrow_chunks, series_to_arrow};
use mango_columnar::ColumnarError;

use crate::error::Result;
use crate::frame::DataFrame;

/// The Arrow schema a frame is written with. Every field is nullable.
pub fn frame_schema(frame: &DataFrame) -> Schema {
    Schema::new(
        frame
            .columns()
            .iter()
            .map(|c| Field::new(c.name(), arrow_data_type(c.dtype()), true))
            .collect::<Vec<_>>(),
    )
}

pub fn frame_to_record_batch(frame: &DataFrame) -> Result<RecordBatch> {
    if frame.width() == 0 {
        return Err(ColumnarError::InvalidArgument(
            "a record batch needs at least one column".to_owned(),
        )
        .into());
    }
    let arrays: Vec<ArrayRef> = frame.columns().iter().map(series_to_arrow).collect();
    Ok(RecordBatch::try_new(Arc::new(frame_schema(frame)), arrays)?)
}

pub fn record_batch_to_frame(batch: &RecordBatch) -> Result<DataFrame> {
    record_batches_to_frame(batch.schema(), std::slice::from_ref(batch))
}

/// Build one frame from batches sharing `schema`. Column `i` of each batch becomes one
/// chunk of the `i`th series, so the frame keeps the batch boundaries.
pub fn record_batches_to_frame(schema: SchemaRef, batches: &[RecordBatch]) -> Result<DataFrame> {
    let columns = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let arrays: Vec<ArrayRef> = batches.iter().map(|b| b.column(idx).clone()).collect();
            series_from_arrow_chunks(field.name().as_str(), field.data_type(), &arrays)
        })
        .collect::<mango_columnar::Result<Vec<_>>>()?;
    DataFrame::new(columns)
}
