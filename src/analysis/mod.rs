pub mod engine;
pub mod views;

pub use engine::{
    analyze_file, analyze_records, analyze_text, ensure_required_views, AnalyticsReport,
    REQUIRED_VIEWS,
};
pub use views::{GoalEvent, KeyStats, PlayTypeStats, ShotZone, TeamStats};
