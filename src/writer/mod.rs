//! Share serialization: turn assigned records back into CSV bytes and
//! synthesize per-recipient download file names.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{WriteError, WriteResult};
use crate::models::Record;

/// Cell value for `column`, empty when the record's file never had it.
pub fn record_cell(record: &Record, column: &str) -> String {
    match record.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Serialize records to CSV bytes: header row always present, merged
/// column order, comma delimiter.
///
/// A share with zero records serializes to a header-only file, so empty
/// shares still produce a valid download.
pub fn to_csv_bytes(headers: &[String], records: &[Record]) -> WriteResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(headers)?;
    for record in records {
        let row: Vec<String> = headers.iter().map(|h| record_cell(record, h)).collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| WriteError::Finalize(e.to_string()))
}

/// Download file name for one recipient's share.
///
/// `leads_<ISO date>_<name>.csv`, with every whitespace character of the
/// display name replaced by `_`. Other path-unsafe characters pass
/// through; sanitizing those is the caller's responsibility.
pub fn share_file_name(recipient: &str, date: NaiveDate) -> String {
    let safe_name: String = recipient
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    format!("leads_{}_{}.csv", date.format("%Y-%m-%d"), safe_name)
}
