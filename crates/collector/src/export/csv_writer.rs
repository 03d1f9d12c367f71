use std::io::Write;

use anyhow::Result;
use common::OutputFormat;
use normalizer::FlatRecord;

use super::RecordWriter;

pub const CSV_HEADER: [&str; 11] = [
    "Name",
    "Owner",
    "Age (years)",
    "Days since last update",
    "Language",
    "Releases",
    "Pull Requests",
    "Closed Issues",
    "Total Issues",
    "Issue Closure Rate",
    "Stars",
];

/// RFC 4180 rows, one per record, after a fixed header. Floats use the
/// shortest representation that parses back to the same value.
pub struct CsvRecordWriter;

impl RecordWriter for CsvRecordWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn write_records(&self, records: &[FlatRecord], out: &mut dyn Write) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(CSV_HEADER)?;
        for record in records {
            writer.write_record([
                record.name.clone(),
                record.owner.clone(),
                record.age_years.to_string(),
                record.days_since_update.to_string(),
                record.language.clone(),
                record.releases.to_string(),
                record.pull_requests.to_string(),
                record.closed_issues.to_string(),
                record.total_issues.to_string(),
                record.issue_closure_rate.to_string(),
                record.stars.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::render;
    use crate::export::test_support::sample_records;

    fn parse_back(bytes: &[u8]) -> Vec<FlatRecord> {
        let mut reader = csv::Reader::from_reader(bytes);
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER);
        reader
            .records()
            .map(|row| {
                let row = row.unwrap();
                FlatRecord {
                    name: row[0].to_string(),
                    owner: row[1].to_string(),
                    age_years: row[2].parse().unwrap(),
                    days_since_update: row[3].parse().unwrap(),
                    language: row[4].to_string(),
                    releases: row[5].parse().unwrap(),
                    pull_requests: row[6].parse().unwrap(),
                    closed_issues: row[7].parse().unwrap(),
                    total_issues: row[8].parse().unwrap(),
                    issue_closure_rate: row[9].parse().unwrap(),
                    stars: row[10].parse().unwrap(),
                }
            })
            .collect()
    }

    #[test]
    fn rows_parse_back_column_for_column() {
        let records = sample_records();
        let bytes = render(&CsvRecordWriter, &records).unwrap();
        assert_eq!(parse_back(&bytes), records);
    }

    #[test]
    fn closure_rate_is_not_rounded() {
        let records = sample_records();
        let text = String::from_utf8(render(&CsvRecordWriter, &records).unwrap()).unwrap();
        assert!(text.contains(&(2.0f64 / 3.0).to_string()));
        assert!(text.contains(",0.3,"));
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        let records = sample_records();
        let text = String::from_utf8(render(&CsvRecordWriter, &records).unwrap()).unwrap();
        assert!(text.contains(r#""quoted, ""name""""#));
    }
}
