//! Parquet files as data frames.
//!
//! Reading keeps one chunk per record batch. Writing emits a single row group built from
//! the frame's columns.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::file::reader::ChunkReader;

use crate::arrow::{frame_to_record_batch, record_batches_to_frame};
use crate::error::Result;
use crate::frame::DataFrame;

pub fn read_parquet(path: impl AsRef<Path>) -> Result<DataFrame> {
    read_parquet_from(File::open(path)?)
}

pub fn read_parquet_bytes(bytes: &[u8]) -> Result<DataFrame> {
    read_parquet_from(Bytes::copy_from_slice(bytes))
}

fn read_parquet_from<R: ChunkReader + 'static>(input: R) -> Result<DataFrame> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(input)?;
    let schema = builder.schema().clone();
    let batches = builder
        .build()?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    log::debug!(
        "read {} parquet record batches with {} columns",
        batches.len(),
        schema.fields().len()
    );
    record_batches_to_frame(schema, &batches)
}

pub fn write_parquet<W: Write + Send>(frame: &DataFrame, writer: W) -> Result<()> {
    let batch = frame_to_record_batch(frame)?;
    let mut writer = ArrowWriter::try_new(writer, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

pub fn write_parquet_path(frame: &DataFrame, path: impl AsRef<Path>) -> Result<()> {
    write_parquet(frame, File::create(path)?)
}

pub fn write_parquet_bytes(frame: &DataFrame) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_parquet(frame, &mut out)?;
    Ok(out)
}
