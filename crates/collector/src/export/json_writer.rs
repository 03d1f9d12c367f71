use std::io::Write;

use anyhow::Result;
use common::OutputFormat;
use normalizer::FlatRecord;

use super::RecordWriter;

/// A pretty-printed JSON array of records in input order.
pub struct JsonRecordWriter;

impl RecordWriter for JsonRecordWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn write_records(&self, records: &[FlatRecord], out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, records)?;
        writeln!(out)?;
        Ok(())
    }
}
