use super::play::PlayEvent;
use serde::Serialize;
use std::cmp::Ordering;

/// One match and its plays in source order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub opponent: String,
    pub date: String,
    pub season: String,
    pub plays: Vec<PlayEvent>,
}

impl Game {
    pub fn goals(&self) -> usize {
        self.plays.iter().filter(|p| p.is_goal()).count()
    }

    pub fn shots(&self) -> usize {
        self.plays.iter().filter(|p| p.is_shot_attempt()).count()
    }

    pub fn total_xg(&self) -> f64 {
        self.plays.iter().map(|p| p.xg).sum()
    }
}

/// Order game identifiers numerically.
///
/// Identifiers that are not numbers sort after every numeric one, and among
/// themselves by plain string order.
pub fn compare_game_ids(a: &str, b: &str) -> Ordering {
    match (numeric_id(a), numeric_id(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn numeric_id(id: &str) -> Option<f64> {
    id.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_order() {
        let mut ids = vec!["10", "2", "1", "21"];
        ids.sort_by(|a, b| compare_game_ids(a, b));
        assert_eq!(ids, vec!["1", "2", "10", "21"]);
    }

    #[test]
    fn test_non_numeric_ids_sort_last() {
        let mut ids = vec!["friendly", "3", "cup", "1"];
        ids.sort_by(|a, b| compare_game_ids(a, b));
        assert_eq!(ids, vec!["1", "3", "cup", "friendly"]);
    }

    #[test]
    fn test_game_totals() {
        let mut scored = PlayEvent::from_record(&Default::default());
        scored.shot_attempt = "Yes".to_string();
        scored.shot_outcome = "Goal".to_string();
        scored.xg = 0.5;
        let mut missed = scored.clone();
        missed.shot_outcome = "Saved".to_string();
        missed.xg = 0.25;

        let game = Game {
            id: "1".to_string(),
            opponent: "Rovers".to_string(),
            date: "2024-03-02".to_string(),
            season: "2024".to_string(),
            plays: vec![scored, missed],
        };
        assert_eq!(game.goals(), 1);
        assert_eq!(game.shots(), 2);
        assert_eq!(game.total_xg(), 0.75);
    }
}
