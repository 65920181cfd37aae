use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::RawRecord;

/// Split delimited text into records by position.
///
/// The first line is the header. Blank lines are skipped silently; rows whose
/// value count differs from the header's are reported and skipped. Quotes get
/// no special treatment, so a delimiter inside a quoted value splits it.
pub fn read_delimited(content: &str, delimiter: char, sink: &mut dyn Diagnostics) -> Vec<RawRecord> {
    let mut lines = content.lines().enumerate();

    let headers: Vec<&str> = match lines.next() {
        Some((_, header)) => header.split(delimiter).map(str::trim).collect(),
        None => return Vec::new(),
    };

    let mut records = Vec::new();

    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split(delimiter).collect();
        if values.len() != headers.len() {
            sink.report(Diagnostic::RaggedRow {
                line: idx + 1,
                expected: headers.len(),
                found: values.len(),
                content: line.to_string(),
            });
            continue;
        }

        records.push(RawRecord::from_pairs(headers.iter().copied().zip(values)));
    }

    records
}
