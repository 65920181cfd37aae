use super::record::{columns, RawRecord, GOAL_MARKER, YES_MARKER};
use serde::Serialize;

/// A single play coerced from a raw record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayEvent {
    pub minute: i32,
    pub play_type: String,
    pub shot_attempt: String,
    pub shot_distance: Option<i32>,
    pub shot_outcome: String,
    #[serde(rename = "xG")]
    pub xg: f64,
    pub play_context: String,
    pub location: String,
    pub outcome: String,
    pub success: bool,
    pub win_impact: i32,
    pub assist_type: String,
    pub phase_of_match: String,
}

impl PlayEvent {
    /// Project a raw record onto typed fields.
    ///
    /// Numeric fields never fail: minute and win impact fall back to 0, xG to
    /// 0.0 and shot distance to `None`.
    pub fn from_record(record: &RawRecord) -> Self {
        Self {
            minute: parse_int_or_zero(record.get(columns::MINUTE)),
            play_type: record.get(columns::PLAY_TYPE).to_string(),
            shot_attempt: record.get(columns::SHOT_ATTEMPT).to_string(),
            shot_distance: parse_distance(record.get(columns::SHOT_DISTANCE)),
            shot_outcome: record.get(columns::SHOT_OUTCOME).to_string(),
            xg: parse_xg(record.get(columns::XG)),
            play_context: record.get(columns::PLAY_CONTEXT).to_string(),
            location: record.get(columns::LOCATION).to_string(),
            outcome: record.get(columns::OUTCOME).to_string(),
            success: record.get(columns::SUCCESS) == YES_MARKER,
            win_impact: parse_int_or_zero(record.get(columns::WIN_IMPACT)),
            assist_type: record.get(columns::ASSIST_TYPE).to_string(),
            phase_of_match: record.get(columns::PHASE_OF_MATCH).to_string(),
        }
    }

    pub fn is_shot_attempt(&self) -> bool {
        self.shot_attempt == YES_MARKER
    }

    pub fn is_goal(&self) -> bool {
        self.shot_outcome == GOAL_MARKER
    }
}

/// Parse the leading integer of a field ("45+2" reads as 45)
fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim();
    let digits_start = usize::from(s.starts_with('-') || s.starts_with('+'));
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..digits_start + digits_len].parse().ok()
}

/// Integer field with a default of 0
pub fn parse_int_or_zero(s: &str) -> i32 {
    parse_leading_int(s).unwrap_or(0)
}

/// Optional shot distance; blank or non-numeric reads as `None`
pub fn parse_distance(s: &str) -> Option<i32> {
    parse_leading_int(s)
}

/// Expected-goals value with a default of 0.0
pub fn parse_xg(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
