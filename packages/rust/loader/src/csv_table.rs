//! Lenient CSV table reader.
//!
//! Turns a delimited text source with a header row into an ordered list of
//! `field name -> value` maps. Tokenizing is delegated to the `csv` crate;
//! this module only decides what to keep:
//!
//! - ragged rows are accepted: extra fields are dropped, missing ones absent
//! - headers and values are trimmed, invalid UTF-8 is decoded lossily
//! - empty header names and empty values are left out of the record
//! - rows the tokenizer rejects are skipped, never fatal
//! - an unbalanced quote costs only its own line, not the rest of the file

use std::collections::BTreeMap;
use std::path::Path;

use eodb_shared::{EodbError, Result};
use tracing::{debug, instrument};

/// One row of a table, keyed by trimmed header name.
pub type RawRecord = BTreeMap<String, String>;

/// Read and parse the table at `path`.
///
/// Fails only when the file cannot be read. Malformed content degrades
/// row by row inside [`parse_table`].
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn load_table(path: &Path) -> Result<Vec<RawRecord>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| EodbError::load(path, e))?;

    let records = parse_table(&bytes);
    debug!(rows = records.len(), bytes = bytes.len(), "table parsed");
    Ok(records)
}

/// Parse CSV bytes with a header row into records.
pub fn parse_table(bytes: &[u8]) -> Vec<RawRecord> {
    let mut reader = reader_builder().from_reader(bytes);
    let mut record = csv::ByteRecord::new();

    let headers: Vec<String> = match reader.read_byte_record(&mut record) {
        Ok(true) => record
            .iter()
            .map(|h| decode_field(h).trim_start_matches('\u{feff}').to_string())
            .collect(),
        Ok(false) => return Vec::new(),
        Err(e) => {
            debug!(error = %e, "unreadable header row, table treated as empty");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    // Offset of the slice `reader` is reading from.
    let mut start = 0usize;

    loop {
        match reader.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) if is_runaway(&record, headers.len()) => {
                let row_start = (start + record_offset(&record)).min(bytes.len());
                let line_end = bytes[row_start..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |n| row_start + n);

                debug!(
                    offset = row_start,
                    "unbalanced quote, row re-read without quoting"
                );
                if let Some(fields) = reread_unquoted(&headers, &bytes[row_start..line_end]) {
                    records.push(fields);
                }

                start = (line_end + 1).min(bytes.len());
                reader = reader_builder().from_reader(&bytes[start..]);
            }
            Ok(true) => {
                if let Some(fields) = to_raw_record(&headers, &record) {
                    records.push(fields);
                }
            }
            Err(e) => {
                debug!(error = %e, "skipping unreadable row");
            }
        }
    }

    records
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

/// A quoted field that never closed: it spans a line break and leaves the
/// row short of columns.
fn is_runaway(record: &csv::ByteRecord, columns: usize) -> bool {
    record.len() < columns && record.iter().any(|field| field.contains(&b'\n'))
}

/// Byte offset of `record` within the slice its reader was built on.
fn record_offset(record: &csv::ByteRecord) -> usize {
    record
        .position()
        .and_then(|p| usize::try_from(p.byte()).ok())
        .unwrap_or(0)
}

/// Parse one source line with quote handling off, dropping the stray quote.
fn reread_unquoted(headers: &[String], line: &[u8]) -> Option<RawRecord> {
    let mut reader = reader_builder().quoting(false).from_reader(line);
    let mut record = csv::ByteRecord::new();
    match reader.read_byte_record(&mut record) {
        Ok(true) => {}
        _ => return None,
    }

    let mut fields = to_raw_record(headers, &record)?;
    for value in fields.values_mut() {
        if value.starts_with('"') && !value.ends_with('"') {
            value.remove(0);
        }
    }
    Some(fields)
}

/// Zip a row with the headers, keeping named, non-empty values.
///
/// `zip` stops at the shorter side, which drops overflow fields.
fn to_raw_record(headers: &[String], record: &csv::ByteRecord) -> Option<RawRecord> {
    let mut fields = RawRecord::new();
    for (name, value) in headers.iter().zip(record.iter()) {
        if name.is_empty() {
            continue;
        }
        let value = decode_field(value);
        if value.is_empty() {
            continue;
        }
        fields.entry(name.clone()).or_insert(value);
    }
    (!fields.is_empty()).then_some(fields)
}

fn decode_field(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/csv")
            .join(name)
    }

    #[test]
    fn parses_header_keyed_records() {
        let input = b"document_number,title\n2025-00100,First\n2025-00050,Second\n";
        let records = parse_table(input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["document_number"], "2025-00100");
        assert_eq!(records[1]["title"], "Second");
    }

    #[test]
    fn ragged_rows_drop_extras_and_leave_missing_absent() {
        let input = b"a,b,c\n1,2,3,4,5\n1\n";
        let records = parse_table(input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[0]["c"], "3");
        assert_eq!(records[1].len(), 1);
        assert!(!records[1].contains_key("b"));
    }

    #[test]
    fn trims_whitespace_and_drops_empty_values() {
        let input = b" a , b \n  x  ,   \n";
        let records = parse_table(input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["a"], "x");
        assert!(!records[0].contains_key("b"));
    }

    #[test]
    fn embedded_quotes_in_unquoted_field_do_not_abort() {
        let input = b"id,title\n1,The \"Golden Dome\" Initiative\n2,Next\n";
        let records = parse_table(input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["title"], "The \"Golden Dome\" Initiative");
        assert_eq!(records[1]["title"], "Next");
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let input = b"id,title\n1,Caf\xe9\n";
        let records = parse_table(input);
        assert_eq!(records.len(), 1);
        assert!(records[0]["title"].starts_with("Caf"));
    }

    #[test]
    fn empty_header_columns_are_ignored() {
        let input = b"id,,title\n1,junk,Kept\n";
        let records = parse_table(input);
        assert_eq!(records[0].len(), 2);
        assert_eq!(records[0]["title"], "Kept");
    }

    #[test]
    fn unbalanced_quote_loses_only_its_own_line() {
        let input = b"document_number,title,agencies\n\
            2025-00001,\"Unbalanced title,['EPA']\n\
            2025-00002,Second,['EPA']\n\
            2025-00003,Third,['DOL']\n";
        let records = parse_table(input);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["document_number"], "2025-00001");
        assert_eq!(records[0]["title"], "Unbalanced title");
        assert_eq!(records[0]["agencies"], "['EPA']");
        assert_eq!(records[1]["title"], "Second");
        assert_eq!(records[2]["agencies"], "['DOL']");
    }

    #[test]
    fn unclosed_quote_at_end_of_input_keeps_the_row() {
        let input = b"id,title\n1,First\n2,\"Dangling";
        let records = parse_table(input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["id"], "2");
        assert_eq!(records[1]["title"], "Dangling");
    }

    #[test]
    fn quoted_line_break_in_full_row_is_kept() {
        let input = b"id,title\n1,\"two\nlines\"\n2,Next\n";
        let records = parse_table(input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["title"], "two\nlines");
        assert_eq!(records[1]["title"], "Next");
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_table(b"").is_empty());
        assert!(parse_table(b"id,title\n").is_empty());
    }

    #[tokio::test]
    async fn load_table_reads_fixture() {
        let records = load_table(&fixture("executive_orders.fixture.csv"))
            .await
            .expect("load fixture");
        assert_eq!(records.len(), 7);
        assert_eq!(records[0]["document_number"], "2025-02000");
        assert_eq!(records[5]["title"], "Workplace Notices");
    }

    #[tokio::test]
    async fn missing_source_is_load_error() {
        let err = load_table(&fixture("does-not-exist.csv"))
            .await
            .expect_err("missing file");
        assert!(matches!(err, EodbError::Load { .. }));
    }
}
