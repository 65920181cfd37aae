use crate::model::{columns, RawRecord};
use lazy_static::lazy_static;
use regex::Regex;

/// Rows handed to a prompt when the caller gives no limit
pub const DEFAULT_MATCH_LIMIT: usize = 25;

/// Columns searched for question keywords
const SEARCHED_COLUMNS: [&str; 7] = [
    columns::PLAY_TYPE,
    columns::PLAY_CONTEXT,
    columns::LOCATION,
    columns::OUTCOME,
    columns::OPPONENT,
    columns::PHASE_OF_MATCH,
    columns::ASSIST_TYPE,
];

const STOP_WORDS: [&str; 24] = [
    "the", "and", "for", "what", "which", "who", "how", "why", "when", "where", "was", "were",
    "are", "did", "does", "this", "that", "with", "from", "about", "our", "their", "play", "plays",
];

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[A-Za-z0-9]+").unwrap();
}

/// Lowercase keywords of three or more characters, stop words removed,
/// deduplicated in question order
pub fn keywords(question: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for m in WORD.find_iter(question) {
        let word = m.as_str().to_lowercase();
        if word.len() < 3 || STOP_WORDS.contains(&word.as_str()) || out.contains(&word) {
            continue;
        }
        out.push(word);
    }
    out
}

fn haystack(record: &RawRecord) -> String {
    SEARCHED_COLUMNS
        .iter()
        .map(|c| record.get(c))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Records mentioning any keyword of the question, in source order, at most `limit`
pub fn relevant_plays<'a>(records: &'a [RawRecord], question: &str, limit: usize) -> Vec<&'a RawRecord> {
    let words = keywords(question);
    if words.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| {
            let text = haystack(r);
            words.iter().any(|w| text.contains(w.as_str()))
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(play_type: &str, opponent: &str) -> RawRecord {
        RawRecord::new()
            .with_field(columns::PLAY_TYPE, play_type)
            .with_field(columns::OPPONENT, opponent)
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            keywords("What happened on the corner kicks vs Rovers? Corner!"),
            vec!["happened", "corner", "kicks", "rovers"]
        );
        assert!(keywords("to be or at").is_empty());
    }

    #[test]
    fn test_relevant_plays_filters_and_limits() {
        let records = vec![
            record("Corner Kick", "Rovers"),
            record("Open Play", "United"),
            record("Corner Kick", "United"),
            record("Counter Attack", "Rovers"),
        ];

        let hits = relevant_plays(&records, "corner", 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].opponent(), "United");

        let hits = relevant_plays(&records, "rovers corner", 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].play_type(), "Corner Kick");
        assert_eq!(hits[1].play_type(), "Corner Kick");
    }

    #[test]
    fn test_no_keywords_no_matches() {
        let records = vec![record("Corner Kick", "Rovers")];
        assert!(relevant_plays(&records, "why?", 10).is_empty());
    }
}
