pub mod analysis;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod model;
pub mod query;
pub mod xlsx;

pub use analysis::{analyze_file, analyze_records, analyze_text, AnalyticsReport};
pub use diagnostics::{CollectingSink, Diagnostic, Diagnostics, LogSink};
pub use error::{AnalyticsError, Result};
pub use loader::{LoadOptions, ParserKind};
pub use model::*;
