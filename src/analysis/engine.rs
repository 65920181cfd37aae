use super::views::{
    goals_timeline, key_stats, play_type_distribution, shot_map, team_comparison, GoalEvent,
    KeyStats, PlayTypeStats, ShotZone, TeamStats,
};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{AnalyticsError, Result};
use crate::loader::{load_file, load_text, LoadOptions};
use crate::model::{columns, compare_game_ids, Game, PlayEvent, RawRecord};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Keys a consumer requires in the serialized report
pub const REQUIRED_VIEWS: [&str; 2] = ["goalsTimeline", "games"];

/// Every derived view plus the games and opponents they were built from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub goals_timeline: Vec<GoalEvent>,
    pub shot_map_data: BTreeMap<String, ShotZone>,
    pub play_type_data: BTreeMap<String, PlayTypeStats>,
    pub team_comparison: BTreeMap<String, TeamStats>,
    pub key_stats: KeyStats,
    pub games: Vec<Game>,
    pub opponents: Vec<String>,
}

impl AnalyticsReport {
    /// Cross-check the views against the games they came from.
    ///
    /// A failure here means the aggregation is broken, not that the input was dirty.
    pub fn check_consistency(&self) -> Result<()> {
        let goal_plays: usize = self.games.iter().map(Game::goals).sum();
        if self.goals_timeline.len() != goal_plays {
            return Err(AnalyticsError::Inconsistent(format!(
                "goals timeline has {} entries but games contain {} goals",
                self.goals_timeline.len(),
                goal_plays
            )));
        }

        let game_ids: HashSet<&str> = self.games.iter().map(|g| g.id.as_str()).collect();
        if game_ids.len() != self.games.len() {
            return Err(AnalyticsError::Inconsistent(
                "duplicate game identifiers in materialized games".to_string(),
            ));
        }
        if let Some(goal) = self.goals_timeline.iter().find(|g| !game_ids.contains(g.game_id.as_str())) {
            return Err(AnalyticsError::Inconsistent(format!(
                "goal at minute {} refers to unknown game {}",
                goal.minute, goal.game_id
            )));
        }

        let games_played: usize = self.team_comparison.values().map(|t| t.games_played).sum();
        if games_played != self.games.len() {
            return Err(AnalyticsError::Inconsistent(format!(
                "team comparison covers {} games but {} were materialized",
                games_played,
                self.games.len()
            )));
        }

        if let Some(game) = self.games.iter().find(|g| !self.opponents.contains(&g.opponent)) {
            return Err(AnalyticsError::Inconsistent(format!(
                "game {} opponent {} missing from opponent list",
                game.id, game.opponent
            )));
        }

        Ok(())
    }

    /// Serialize to JSON, rejecting output that lacks a required view
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        let value = serde_json::to_value(self)?;
        ensure_required_views(&value)?;
        Ok(value)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let value = self.to_json_value()?;
        let json = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(json)
    }
}

/// Reject a serialized report whose goals timeline or game list is absent
pub fn ensure_required_views(value: &serde_json::Value) -> Result<()> {
    for key in REQUIRED_VIEWS {
        match value.get(key) {
            Some(v) if v.is_array() => {}
            _ => return Err(AnalyticsError::MissingView(key.to_string())),
        }
    }
    Ok(())
}

/// Distinct non-empty game identifiers in numeric order
pub fn game_ids(records: &[RawRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids: Vec<String> = records
        .iter()
        .map(RawRecord::game_id)
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .map(String::from)
        .collect();
    ids.sort_by(|a, b| compare_game_ids(a, b));
    ids
}

/// Distinct non-empty opponent names in first-seen order
pub fn opponents(records: &[RawRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(RawRecord::opponent)
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(String::from)
        .collect()
}

/// Build one game from its rows, or report why it was dropped.
///
/// The first row supplies opponent, date and season.
pub fn materialize_game(id: &str, rows: &[&RawRecord], sink: &mut dyn Diagnostics) -> Option<Game> {
    let Some(first) = rows.first() else {
        sink.report(Diagnostic::GameWithoutPlays {
            game_id: id.to_string(),
        });
        return None;
    };

    let missing: Vec<&'static str> = [columns::OPPONENT, columns::DATE, columns::SEASON]
        .into_iter()
        .filter(|c| first.get(c).is_empty())
        .collect();
    if !missing.is_empty() {
        sink.report(Diagnostic::GameMissingFields {
            game_id: id.to_string(),
            missing,
        });
        return None;
    }

    Some(Game {
        id: id.to_string(),
        opponent: first.opponent().to_string(),
        date: first.get(columns::DATE).to_string(),
        season: first.get(columns::SEASON).to_string(),
        plays: rows.iter().map(|r| PlayEvent::from_record(r)).collect(),
    })
}

/// Materialize every game in identifier order
pub fn materialize_games(records: &[RawRecord], ids: &[String], sink: &mut dyn Diagnostics) -> Vec<Game> {
    let mut by_game: HashMap<&str, Vec<&RawRecord>> = HashMap::new();
    for record in records {
        by_game.entry(record.game_id()).or_default().push(record);
    }

    ids.iter()
        .filter_map(|id| {
            let rows = by_game.get(id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            materialize_game(id, rows, sink)
        })
        .collect()
}

/// Run key extraction, game materialization, every view, and the final checks
pub fn analyze_records(records: &[RawRecord], sink: &mut dyn Diagnostics) -> Result<AnalyticsReport> {
    let ids = game_ids(records);
    let opponents = opponents(records);
    log::debug!(
        "Found {} game ids and {} opponents in {} records",
        ids.len(),
        opponents.len(),
        records.len()
    );

    let games = materialize_games(records, &ids, sink);
    if games.len() < ids.len() {
        log::info!("Dropped {} of {} games", ids.len() - games.len(), ids.len());
    }

    let report = AnalyticsReport {
        goals_timeline: goals_timeline(&games),
        shot_map_data: shot_map(records),
        play_type_data: play_type_distribution(records),
        team_comparison: team_comparison(&games),
        key_stats: key_stats(records, games.len()),
        games,
        opponents,
    };

    report.check_consistency()?;
    Ok(report)
}

/// Load source text and analyze it
pub fn analyze_text(content: &str, options: &LoadOptions, sink: &mut dyn Diagnostics) -> Result<AnalyticsReport> {
    let records = load_text(content, options, sink)?;
    analyze_records(&records, sink)
}

/// Read a data file and analyze it
pub fn analyze_file(path: &Path, options: &LoadOptions, sink: &mut dyn Diagnostics) -> Result<AnalyticsReport> {
    let records = load_file(path, options, sink)?;
    analyze_records(&records, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    const HEADER: &str = "Game ID,Opponent,Date,Season,Minute,Play Type,Shot Attempt,Shot Distance,Shot Outcome,xG,Play Context,Location on Field,Outcome,Success,Win Impact,Assist Type,Phase of Match";

    fn analyze(body: &str) -> (AnalyticsReport, CollectingSink) {
        let text = format!("{}\n{}", HEADER, body);
        let mut sink = CollectingSink::new();
        let report = analyze_text(&text, &LoadOptions::default(), &mut sink).unwrap();
        (report, sink)
    }

    #[test]
    fn test_two_shot_example() {
        let (report, sink) = analyze(
            "1,A,2024-03-02,2024,12,Open Play,Yes,14,Goal,0.3,Cutback,Box,Scored,Yes,1,Pass,First Half\n\
             1,A,2024-03-02,2024,30,Open Play,Yes,20,Miss,0.1,Long Shot,Box,Wide,No,0,None,First Half\n",
        );

        assert!(sink.is_empty());
        assert_eq!(report.games.len(), 1);
        assert_eq!(report.games[0].plays.len(), 2);

        let zone = &report.shot_map_data["Box"];
        assert_eq!(zone.total_shots, 2);
        assert_eq!(zone.goals, 1);
        assert!((zone.avg_xg - 0.2).abs() < 1e-9);
        assert_eq!(zone.success_rate, 50.0);

        assert_eq!(report.key_stats.total_goals, 1);
        assert_eq!(report.goals_timeline.len(), 1);
        assert_eq!(report.goals_timeline[0].minute, 12);
        assert_eq!(report.opponents, vec!["A".to_string()]);
    }

    #[test]
    fn test_header_only_input() {
        let (report, sink) = analyze("");

        assert!(sink.is_empty());
        assert!(report.games.is_empty());
        assert!(report.goals_timeline.is_empty());
        assert!(report.shot_map_data.is_empty());
        assert!(report.play_type_data.is_empty());
        assert!(report.team_comparison.is_empty());
        assert_eq!(report.key_stats.total_games, 0);
        assert_eq!(report.key_stats.conversion_rate, 0.0);
        assert_eq!(report.key_stats.avg_xg_per_shot, 0.0);
        assert!(report.to_json(false).is_ok());
    }

    #[test]
    fn test_games_sorted_numerically() {
        let (report, _) = analyze(
            "10,B,2024-04-01,2024,5,Set Piece,No,,,0,,,,,0,,\n\
             2,A,2024-03-01,2024,5,Set Piece,No,,,0,,,,,0,,\n\
             1,C,2024-02-01,2024,5,Set Piece,No,,,0,,,,,0,,\n",
        );
        let ids: Vec<&str> = report.games.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
        assert_eq!(report.opponents, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_game_missing_fields_dropped() {
        let (report, sink) = analyze(
            "1,A,2024-03-02,2024,12,Open Play,Yes,14,Goal,0.3,,Box,,,0,,\n\
             2,B,,2024,40,Open Play,Yes,10,Goal,0.6,,Box,,,0,,\n",
        );

        assert_eq!(report.games.len(), 1);
        assert_eq!(report.goals_timeline.len(), 1);
        assert_eq!(report.team_comparison.len(), 1);
        assert!(!report.team_comparison.contains_key("B"));
        assert_eq!(
            sink.diagnostics,
            vec![Diagnostic::GameMissingFields {
                game_id: "2".to_string(),
                missing: vec![columns::DATE],
            }]
        );
        // raw-record views still see the dropped game's rows
        assert_eq!(report.key_stats.total_goals, 2);
        assert_eq!(report.shot_map_data["Box"].total_shots, 2);
    }

    #[test]
    fn test_blank_game_id_feeds_record_views_only() {
        let (report, sink) = analyze(
            "1,A,2024-03-02,2024,12,Open Play,Yes,14,Miss,0.3,,Box,,,0,,\n\
             ,A,2024-03-02,2024,20,Open Play,Yes,12,Goal,0.4,,Box,,,0,,\n",
        );

        assert!(sink.is_empty());
        assert_eq!(report.games.len(), 1);
        assert_eq!(report.games[0].id, "1");
        assert_eq!(report.games[0].plays.len(), 1);
        assert!(report.goals_timeline.is_empty());
        assert_eq!(report.team_comparison["A"].total_shots, 1);

        assert_eq!(report.key_stats.total_games, 1);
        assert_eq!(report.key_stats.total_shots, 2);
        assert_eq!(report.key_stats.total_goals, 1);
        assert_eq!(report.shot_map_data["Box"].total_shots, 2);
        assert_eq!(report.shot_map_data["Box"].goals, 1);
        assert_eq!(report.play_type_data["Open Play"].count, 2);
    }

    #[test]
    fn test_game_without_plays_reported() {
        let mut sink = CollectingSink::new();
        assert!(materialize_game("7", &[], &mut sink).is_none());
        assert_eq!(
            sink.diagnostics,
            vec![Diagnostic::GameWithoutPlays {
                game_id: "7".to_string()
            }]
        );
    }

    #[test]
    fn test_ragged_row_excluded_everywhere() {
        let good = "1,A,2024-03-02,2024,12,Open Play,Yes,14,Goal,0.3,Cutback,Box,Scored,Yes,1,Pass,First Half\n";
        let ragged = "1,A,2024-03-02,2024,30,Open Play,Yes,20,Goal,0.1,Long Shot,Box,Wide,No\n";
        let (report, sink) = analyze(&format!("{}{}", good, ragged));

        assert_eq!(sink.ragged_rows(), 1);
        assert_eq!(report.key_stats.total_plays, 1);
        assert_eq!(report.key_stats.total_goals, 1);
        assert_eq!(report.games[0].plays.len(), 1);
        assert_eq!(report.shot_map_data["Box"].total_shots, 1);
    }

    #[test]
    fn test_team_goals_sum_to_key_stats() {
        let (report, _) = analyze(
            "1,A,2024-03-02,2024,12,Open Play,Yes,14,Goal,0.3,,Box,,,0,,\n\
             2,B,2024-03-09,2024,50,Counter,Yes,8,Goal,0.5,,Six Yard,,,0,,\n\
             3,A,2024-03-16,2024,70,Corner,Yes,6,Goal,0.4,,Six Yard,,,0,,\n\
             3,A,2024-03-16,2024,80,Corner,Yes,6,Saved,0.2,,Six Yard,,,0,,\n",
        );
        let team_goals: usize = report.team_comparison.values().map(|t| t.total_goals).sum();
        assert_eq!(team_goals, report.key_stats.total_goals);
        assert_eq!(report.team_comparison["A"].games_played, 2);
    }

    #[test]
    fn test_inconsistent_report_detected() {
        let (mut report, _) = analyze("1,A,2024-03-02,2024,12,Open Play,Yes,14,Goal,0.3,,Box,,,0,,\n");
        report.goals_timeline.clear();
        let err = report.check_consistency().unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_required_views_check() {
        let value = serde_json::json!({ "games": [], "keyStats": {} });
        assert!(matches!(
            ensure_required_views(&value),
            Err(AnalyticsError::MissingView(ref key)) if key == "goalsTimeline"
        ));

        let (report, _) = analyze("");
        let value = report.to_json_value().unwrap();
        assert!(value["shotMapData"].is_object());
        assert_eq!(value["keyStats"]["totalGames"], 0);
    }

    #[test]
    fn test_json_field_names() {
        let (report, _) = analyze("1,A,2024-03-02,2024,12,Open Play,Yes,14,Goal,0.3,,Box,,Yes,2,,\n");
        let value = report.to_json_value().unwrap();
        assert_eq!(value["goalsTimeline"][0]["gameId"], "1");
        assert_eq!(value["goalsTimeline"][0]["winImpact"], 2);
        assert_eq!(value["games"][0]["plays"][0]["xG"], 0.3);
        assert_eq!(value["games"][0]["plays"][0]["shotDistance"], 14);
        assert_eq!(value["teamComparison"]["A"]["avgXGPerShot"], 0.3);
        assert_eq!(value["shotMapData"]["Box"]["successRate"], 100.0);
    }
}
