use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Aggregation is internally inconsistent: {0}")]
    Inconsistent(String),

    #[error("Result is missing required view: {0}")]
    MissingView(String),

    #[error("Text completion failed: {0}")]
    Completion(String),

    #[error("No model in the fallback list could serve the request")]
    NoModelAvailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

impl AnalyticsError {
    /// True for faults that indicate a defect in the aggregation itself rather
    /// than unusable input.
    pub fn is_internal(&self) -> bool {
        matches!(self, AnalyticsError::Inconsistent(_) | AnalyticsError::MissingView(_))
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
