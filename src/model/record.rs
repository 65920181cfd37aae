use std::collections::HashMap;

/// Marker used by the Shot Attempt and Success columns
pub const YES_MARKER: &str = "Yes";

/// Marker used by the Shot Outcome column for a scored shot
pub const GOAL_MARKER: &str = "Goal";

/// Column names of the play-by-play dataset
pub mod columns {
    pub const GAME_ID: &str = "Game ID";
    pub const OPPONENT: &str = "Opponent";
    pub const DATE: &str = "Date";
    pub const SEASON: &str = "Season";
    pub const MINUTE: &str = "Minute";
    pub const PLAY_TYPE: &str = "Play Type";
    pub const SHOT_ATTEMPT: &str = "Shot Attempt";
    pub const SHOT_DISTANCE: &str = "Shot Distance";
    pub const SHOT_OUTCOME: &str = "Shot Outcome";
    pub const XG: &str = "xG";
    pub const PLAY_CONTEXT: &str = "Play Context";
    pub const LOCATION: &str = "Location on Field";
    pub const OUTCOME: &str = "Outcome";
    pub const SUCCESS: &str = "Success";
    pub const WIN_IMPACT: &str = "Win Impact";
    pub const ASSIST_TYPE: &str = "Assist Type";
    pub const PHASE_OF_MATCH: &str = "Phase of Match";

    /// Every column the engine reads
    pub const ALL: [&str; 17] = [
        GAME_ID,
        OPPONENT,
        DATE,
        SEASON,
        MINUTE,
        PLAY_TYPE,
        SHOT_ATTEMPT,
        SHOT_DISTANCE,
        SHOT_OUTCOME,
        XG,
        PLAY_CONTEXT,
        LOCATION,
        OUTCOME,
        SUCCESS,
        WIN_IMPACT,
        ASSIST_TYPE,
        PHASE_OF_MATCH,
    ];
}

/// One data row keyed by trimmed column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from header/value pairs, trimming both sides
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();
        Self { fields }
    }

    pub fn with_field(mut self, column: &str, value: &str) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: &str) {
        self.fields
            .insert(column.trim().to_string(), value.trim().to_string());
    }

    /// Value for a column; absent columns read as the empty string
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn game_id(&self) -> &str {
        self.get(columns::GAME_ID)
    }

    pub fn opponent(&self) -> &str {
        self.get(columns::OPPONENT)
    }

    pub fn location(&self) -> &str {
        self.get(columns::LOCATION)
    }

    pub fn play_type(&self) -> &str {
        self.get(columns::PLAY_TYPE)
    }

    pub fn is_shot_attempt(&self) -> bool {
        self.get(columns::SHOT_ATTEMPT) == YES_MARKER
    }

    pub fn is_goal(&self) -> bool {
        self.get(columns::SHOT_OUTCOME) == GOAL_MARKER
    }

    pub fn xg(&self) -> f64 {
        super::play::parse_xg(self.get(columns::XG))
    }
}
