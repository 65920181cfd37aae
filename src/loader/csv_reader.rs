use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::model::RawRecord;
use csv::{ReaderBuilder, StringRecord};

/// Read delimited text with the quote-aware `csv` reader.
///
/// Same row policy as the positional splitter: blank rows vanish, rows with
/// the wrong number of values are reported and skipped.
pub fn read_csv(content: &str, delimiter: u8, sink: &mut dyn Diagnostics) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        if is_blank(&row) {
            continue;
        }

        if row.len() != headers.len() {
            let line = row.position().map(|p| p.line() as usize).unwrap_or(0);
            let separator = (delimiter as char).to_string();
            sink.report(Diagnostic::RaggedRow {
                line,
                expected: headers.len(),
                found: row.len(),
                content: row.iter().collect::<Vec<_>>().join(separator.as_str()),
            });
            continue;
        }

        records.push(RawRecord::from_pairs(
            headers.iter().map(String::as_str).zip(row.iter()),
        ));
    }

    Ok(records)
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|v| v.trim().is_empty()) && row.len() <= 1
}
