//! Diagnostics sink for recoverable skips
//!
//! The loader and engine never log directly; they report what they dropped to a
//! [`Diagnostics`] implementation so the pipeline stays a pure function of its
//! input and tests can observe every skip.

use std::fmt;

/// A recoverable problem found while loading or materializing data
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A data row whose value count differs from the header's column count
    RaggedRow {
        /// 1-based line number in the source text
        line: usize,
        expected: usize,
        found: usize,
        content: String,
    },
    /// A game identifier with no plays attached to it
    GameWithoutPlays { game_id: String },
    /// A game whose first record lacks opponent, date or season
    GameMissingFields {
        game_id: String,
        missing: Vec<&'static str>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RaggedRow {
                line,
                expected,
                found,
                content,
            } => write!(
                f,
                "Line {}: expected {} values, found {}; skipping row: {}",
                line, expected, found, content
            ),
            Diagnostic::GameWithoutPlays { game_id } => {
                write!(f, "Game {}: no plays found; skipping game", game_id)
            }
            Diagnostic::GameMissingFields { game_id, missing } => write!(
                f,
                "Game {}: missing {}; skipping game",
                game_id,
                missing.join(", ")
            ),
        }
    }
}

/// Receiver for recoverable-skip diagnostics
pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to the `log` facade at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl Diagnostics for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
    }
}

/// Keeps every diagnostic in arrival order
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Count of ragged rows that were skipped
    pub fn ragged_rows(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::RaggedRow { .. }))
            .count()
    }

    /// Count of games that were dropped during materialization
    pub fn dropped_games(&self) -> usize {
        self.diagnostics.len() - self.ragged_rows()
    }
}

impl Diagnostics for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_row_display() {
        let d = Diagnostic::RaggedRow {
            line: 4,
            expected: 17,
            found: 14,
            content: "1,A".to_string(),
        };
        assert_eq!(
            d.to_string(),
            "Line 4: expected 17 values, found 14; skipping row: 1,A"
        );
    }

    #[test]
    fn test_collecting_sink_counts() {
        let mut sink = CollectingSink::new();
        sink.report(Diagnostic::GameWithoutPlays {
            game_id: "3".to_string(),
        });
        sink.report(Diagnostic::RaggedRow {
            line: 2,
            expected: 3,
            found: 2,
            content: String::new(),
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.ragged_rows(), 1);
        assert_eq!(sink.dropped_games(), 1);
    }
}
