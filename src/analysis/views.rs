//! The five aggregate views and the folds that build them

use crate::model::{columns, Game, RawRecord, YES_MARKER};
use serde::Serialize;
use std::collections::BTreeMap;

/// `part / total * 100`, or 0 when there is nothing to divide by
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Arithmetic mean, or 0 for an empty set
pub fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// A scored goal with its owning game attached
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEvent {
    pub minute: i32,
    pub game_id: String,
    pub opponent: String,
    pub play_type: String,
    pub play_context: String,
    pub location: String,
    #[serde(rename = "xG")]
    pub xg: f64,
    pub win_impact: i32,
}

/// Shot totals for one field location
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotZone {
    pub total_shots: usize,
    pub goals: usize,
    #[serde(rename = "avgXG")]
    pub avg_xg: f64,
    /// Goals per shot, as a percentage
    pub success_rate: f64,
}

/// Totals for one play type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayTypeStats {
    pub count: usize,
    pub shots: usize,
    pub goals: usize,
    #[serde(rename = "avgXG")]
    pub avg_xg: f64,
}

/// Totals against one opponent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub games_played: usize,
    pub total_goals: usize,
    pub total_shots: usize,
    #[serde(rename = "totalXG")]
    pub total_xg: f64,
    /// Goals per shot attempt, as a percentage
    pub conversion_rate: f64,
    #[serde(rename = "avgXGPerShot")]
    pub avg_xg_per_shot: f64,
}

/// League-wide totals over every record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStats {
    pub total_games: usize,
    pub total_plays: usize,
    pub total_goals: usize,
    pub total_shots: usize,
    #[serde(rename = "totalXG")]
    pub total_xg: f64,
    pub conversion_rate: f64,
    #[serde(rename = "avgXGPerShot")]
    pub avg_xg_per_shot: f64,
    /// Plays flagged successful, as a percentage of all plays
    pub success_rate: f64,
}

/// Running totals shared by every grouped view
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    rows: usize,
    shots: usize,
    goals: usize,
    /// Goals on rows that were also shot attempts
    scored_shots: usize,
    xg_sum: f64,
}

impl Tally {
    fn add(&mut self, shot: bool, goal: bool, xg: f64) {
        self.rows += 1;
        self.shots += usize::from(shot);
        self.goals += usize::from(goal);
        self.scored_shots += usize::from(shot && goal);
        self.xg_sum += xg;
    }

    /// Share of shot attempts that scored; never above 100
    fn conversion_rate(&self) -> f64 {
        percentage(self.scored_shots, self.shots)
    }
}

/// Every goal across all games, in game order then play order
pub fn goals_timeline(games: &[Game]) -> Vec<GoalEvent> {
    games
        .iter()
        .flat_map(|game| {
            game.plays.iter().filter(|p| p.is_goal()).map(move |p| GoalEvent {
                minute: p.minute,
                game_id: game.id.clone(),
                opponent: game.opponent.clone(),
                play_type: p.play_type.clone(),
                play_context: p.play_context.clone(),
                location: p.location.clone(),
                xg: p.xg,
                win_impact: p.win_impact,
            })
        })
        .collect()
}

/// Shot attempts grouped by non-empty field location
pub fn shot_map(records: &[RawRecord]) -> BTreeMap<String, ShotZone> {
    let mut groups: BTreeMap<String, Tally> = BTreeMap::new();

    for record in records.iter().filter(|r| r.is_shot_attempt()) {
        let location = record.location();
        if location.is_empty() {
            continue;
        }
        groups
            .entry(location.to_string())
            .or_default()
            .add(true, record.is_goal(), record.xg());
    }

    groups
        .into_iter()
        .map(|(location, t)| {
            let zone = ShotZone {
                total_shots: t.rows,
                goals: t.goals,
                avg_xg: mean(t.xg_sum, t.rows),
                success_rate: percentage(t.goals, t.rows),
            };
            (location, zone)
        })
        .collect()
}

/// All records grouped by non-empty play type
pub fn play_type_distribution(records: &[RawRecord]) -> BTreeMap<String, PlayTypeStats> {
    let mut groups: BTreeMap<String, Tally> = BTreeMap::new();

    for record in records {
        let play_type = record.play_type();
        if play_type.is_empty() {
            continue;
        }
        groups
            .entry(play_type.to_string())
            .or_default()
            .add(record.is_shot_attempt(), record.is_goal(), record.xg());
    }

    groups
        .into_iter()
        .map(|(play_type, t)| {
            let stats = PlayTypeStats {
                count: t.rows,
                shots: t.shots,
                goals: t.goals,
                avg_xg: mean(t.xg_sum, t.rows),
            };
            (play_type, stats)
        })
        .collect()
}

/// Materialized games grouped by opponent
pub fn team_comparison(games: &[Game]) -> BTreeMap<String, TeamStats> {
    let mut groups: BTreeMap<String, (usize, Tally)> = BTreeMap::new();

    for game in games {
        let (games_played, tally) = groups.entry(game.opponent.clone()).or_default();
        *games_played += 1;
        for play in &game.plays {
            tally.add(play.is_shot_attempt(), play.is_goal(), play.xg);
        }
    }

    groups
        .into_iter()
        .map(|(opponent, (games_played, t))| {
            let stats = TeamStats {
                games_played,
                total_goals: t.goals,
                total_shots: t.shots,
                total_xg: t.xg_sum,
                conversion_rate: t.conversion_rate(),
                avg_xg_per_shot: mean(t.xg_sum, t.shots),
            };
            (opponent, stats)
        })
        .collect()
}

/// Totals over the whole record set, unfiltered by opponent
pub fn key_stats(records: &[RawRecord], total_games: usize) -> KeyStats {
    let mut tally = Tally::default();
    let mut successes = 0;

    for record in records {
        tally.add(record.is_shot_attempt(), record.is_goal(), record.xg());
        if record.get(columns::SUCCESS) == YES_MARKER {
            successes += 1;
        }
    }

    KeyStats {
        total_games,
        total_plays: tally.rows,
        total_goals: tally.goals,
        total_shots: tally.shots,
        total_xg: tally.xg_sum,
        conversion_rate: tally.conversion_rate(),
        avg_xg_per_shot: mean(tally.xg_sum, tally.shots),
        success_rate: percentage(successes, tally.rows),
    }
}
