//! Tabular loading of play-by-play text into raw records

pub mod csv_reader;
pub mod delimited;

use crate::diagnostics::Diagnostics;
use crate::error::{AnalyticsError, Result};
use crate::model::RawRecord;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use csv_reader::read_csv;
pub use delimited::read_delimited;

/// Which splitter turns text rows into values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserKind {
    /// Positional split on the raw delimiter, no quoting
    #[default]
    Naive,
    /// Quote-aware reader from the `csv` crate.
    ///
    /// Blank lines before the header are skipped, so the header is the first
    /// non-blank line. The naive splitter always takes line 0 as the header.
    Csv,
}

impl FromStr for ParserKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "naive" | "plain" => Ok(ParserKind::Naive),
            "csv" | "quoted" => Ok(ParserKind::Csv),
            other => Err(format!("Unknown parser '{}' (expected naive or csv)", other)),
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserKind::Naive => write!(f, "naive"),
            ParserKind::Csv => write!(f, "csv"),
        }
    }
}

/// Options for turning source text into records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub parser: ParserKind,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            parser: ParserKind::Naive,
        }
    }
}

impl LoadOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_parser(mut self, parser: ParserKind) -> Self {
        self.parser = parser;
        self
    }
}

/// Parse source text into records, reporting skipped rows to `sink`
pub fn load_text(
    content: &str,
    options: &LoadOptions,
    sink: &mut dyn Diagnostics,
) -> Result<Vec<RawRecord>> {
    match options.parser {
        ParserKind::Naive => Ok(read_delimited(content, options.delimiter as char, sink)),
        ParserKind::Csv => read_csv(content, options.delimiter, sink),
    }
}

/// Read the full source text of a data file
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| AnalyticsError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a data file
pub fn load_file(
    path: &Path,
    options: &LoadOptions,
    sink: &mut dyn Diagnostics,
) -> Result<Vec<RawRecord>> {
    let content = read_source(path)?;
    log::debug!("Read {} bytes from {}", content.len(), path.display());
    load_text(&content, options, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use std::io::Write;

    #[test]
    fn test_parser_kind_from_str() {
        assert_eq!("naive".parse::<ParserKind>().unwrap(), ParserKind::Naive);
        assert_eq!("CSV".parse::<ParserKind>().unwrap(), ParserKind::Csv);
        assert!("json".parse::<ParserKind>().is_err());
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let mut sink = CollectingSink::new();
        let err = load_file(&path, &LoadOptions::default(), &mut sink).unwrap_err();
        assert!(matches!(err, AnalyticsError::SourceUnavailable { .. }));
        assert!(!err.is_internal());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Game ID,Opponent").unwrap();
        writeln!(file, "1,Rovers").unwrap();
        writeln!(file, "2,United,extra").unwrap();

        let mut sink = CollectingSink::new();
        let records = load_file(file.path(), &LoadOptions::default(), &mut sink).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(sink.ragged_rows(), 1);
    }

    #[test]
    fn test_leading_blank_line_header_choice() {
        let text = "\nGame ID,Opponent\n1,Rovers\n";

        let mut naive_sink = CollectingSink::new();
        let naive = load_text(text, &LoadOptions::default(), &mut naive_sink).unwrap();
        assert!(naive.is_empty());
        assert_eq!(naive_sink.ragged_rows(), 2);

        let mut csv_sink = CollectingSink::new();
        let options = LoadOptions::default().with_parser(ParserKind::Csv);
        let csv = load_text(text, &options, &mut csv_sink).unwrap();
        assert_eq!(csv.len(), 1);
        assert_eq!(csv[0].opponent(), "Rovers");
        assert!(csv_sink.is_empty());
    }

    #[test]
    fn test_both_parsers_agree_on_plain_input() {
        let text = "Game ID;Opponent;xG\n1;Rovers;0.3\n\n2;United\n3;City;0.1\n";
        let options = LoadOptions::default().with_delimiter(b';');

        let mut naive_sink = CollectingSink::new();
        let naive = load_text(text, &options, &mut naive_sink).unwrap();

        let mut csv_sink = CollectingSink::new();
        let csv = load_text(text, &options.with_parser(ParserKind::Csv), &mut csv_sink).unwrap();

        assert_eq!(naive, csv);
        assert_eq!(naive.len(), 2);
        assert_eq!(naive_sink.ragged_rows(), 1);
        assert_eq!(csv_sink.ragged_rows(), 1);
    }
}
