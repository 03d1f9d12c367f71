use std::io::Write;

use anyhow::Result;
use common::OutputFormat;
use normalizer::FlatRecord;

mod csv_writer;
mod json_writer;

pub use csv_writer::{CsvRecordWriter, CSV_HEADER};
pub use json_writer::JsonRecordWriter;

/// Serialization strategy for the final record set.
pub trait RecordWriter: Send + Sync {
    fn format(&self) -> OutputFormat;

    fn write_records(&self, records: &[FlatRecord], out: &mut dyn Write) -> Result<()>;
}

pub fn writer_for(format: OutputFormat) -> Box<dyn RecordWriter> {
    match format {
        OutputFormat::Csv => Box::new(CsvRecordWriter),
        OutputFormat::Json => Box::new(JsonRecordWriter),
    }
}

/// Serializes into memory so nothing reaches disk unless the whole set encodes.
pub fn render(writer: &dyn RecordWriter, records: &[FlatRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    writer.write_records(records, &mut buf)?;
    Ok(buf)
}
