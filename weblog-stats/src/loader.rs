use std::io::Read;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::{
    models::LogRecord,
    parser::{RowError, parse_record},
};

/// Frames `source` as header-less CSV and keeps every row that parses, in input order.
///
/// Rejected rows are logged and dropped; nothing here is fatal.
pub fn load_records<R: Read>(source: R) -> Vec<LogRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in reader.records() {
        let position = match &row {
            Ok(row) => row.position(),
            Err(e) => e.position(),
        };
        let line = position.map(|p| p.line()).unwrap_or_default();
        let parsed = row
            .map_err(|e| RowError::Malformed(e.to_string()))
            .and_then(|row| parse_record(&row));
        match parsed {
            Ok(record) => records.push(record),
            Err(e) => {
                dropped += 1;
                warn!(line, "Skipping row: {e}");
            }
        }
    }
    debug!("Loaded {} records, dropped {dropped}", records.len());
    records
}
