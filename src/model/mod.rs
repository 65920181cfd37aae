pub mod game;
pub mod play;
pub mod record;

pub use game::{compare_game_ids, Game};
pub use play::{parse_distance, parse_int_or_zero, parse_xg, PlayEvent};
pub use record::{columns, RawRecord, GOAL_MARKER, YES_MARKER};
