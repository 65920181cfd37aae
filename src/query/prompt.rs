use crate::analysis::KeyStats;
use crate::model::{columns, RawRecord};

/// Columns shown for each grounding row
const ROW_COLUMNS: [&str; 12] = [
    columns::GAME_ID,
    columns::OPPONENT,
    columns::MINUTE,
    columns::PLAY_TYPE,
    columns::SHOT_ATTEMPT,
    columns::SHOT_OUTCOME,
    columns::XG,
    columns::PLAY_CONTEXT,
    columns::LOCATION,
    columns::OUTCOME,
    columns::ASSIST_TYPE,
    columns::PHASE_OF_MATCH,
];

/// The two prompts that can be sent before any answer exists
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSet {
    pub researcher: String,
    pub model: String,
}

impl PromptSet {
    pub fn build(question: &str, rows: &[&RawRecord], stats: &KeyStats) -> Self {
        Self {
            researcher: researcher_prompt(question, rows),
            model: model_prompt(question, rows, stats),
        }
    }
}

fn format_rows(rows: &[&RawRecord]) -> String {
    if rows.is_empty() {
        return "(no matching plays in the dataset)\n".to_string();
    }

    let mut out = ROW_COLUMNS.join(" | ");
    out.push('\n');
    for row in rows {
        let values: Vec<&str> = ROW_COLUMNS.iter().map(|c| row.get(c)).collect();
        out.push_str(&values.join(" | "));
        out.push('\n');
    }
    out
}

/// Prompt asking for a descriptive, data-first reading of the plays
pub fn researcher_prompt(question: &str, rows: &[&RawRecord]) -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(
        "You are a soccer performance researcher. Answer using only the play-by-play rows below.\n\
         Describe what happened, cite minutes and opponents, and say when the rows do not cover the question.\n\n",
    );
    prompt.push_str(&format!("## QUESTION\n{}\n\n", question.trim()));
    prompt.push_str("## PLAYS\n");
    prompt.push_str(&format_rows(rows));
    prompt
}

/// Prompt asking for an expected-goals reading of the same plays against league totals
pub fn model_prompt(question: &str, rows: &[&RawRecord], stats: &KeyStats) -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(
        "You are a soccer analytics model. Judge the plays below by expected goals and compare them\n\
         with the season totals. Use the numbers given; do not invent new ones.\n\n",
    );
    prompt.push_str(&format!("## QUESTION\n{}\n\n", question.trim()));
    prompt.push_str("## SEASON TOTALS\n");
    prompt.push_str(&format!(
        "Games: {} | Plays: {} | Shots: {} | Goals: {} | Total xG: {:.2}\n\
         Conversion: {:.1}% | xG per shot: {:.3} | Play success: {:.1}%\n\n",
        stats.total_games,
        stats.total_plays,
        stats.total_shots,
        stats.total_goals,
        stats.total_xg,
        stats.conversion_rate,
        stats.avg_xg_per_shot,
        stats.success_rate,
    ));
    prompt.push_str("## PLAYS\n");
    prompt.push_str(&format_rows(rows));
    prompt
}

/// Prompt asking a coach to reconcile the researcher and model answers
pub fn coach_prompt(question: &str, researcher_answer: &str, model_answer: &str) -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(
        "You are the head coach. Two analysts answered the question below.\n\
         Reconcile their views into a short conclusion with one concrete coaching takeaway.\n\n",
    );
    prompt.push_str(&format!("## QUESTION\n{}\n\n", question.trim()));
    prompt.push_str(&format!("## RESEARCHER\n{}\n\n", researcher_answer.trim()));
    prompt.push_str(&format!("## MODEL\n{}\n", model_answer.trim()));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::views::key_stats;

    #[test]
    fn test_researcher_prompt_lists_rows() {
        let row = RawRecord::new()
            .with_field(columns::GAME_ID, "4")
            .with_field(columns::OPPONENT, "Rovers")
            .with_field(columns::PLAY_TYPE, "Corner Kick");
        let prompt = researcher_prompt(" corners? ", &[&row]);

        assert!(prompt.contains("## QUESTION\ncorners?\n"));
        assert!(prompt.contains("4 | Rovers | "));
        assert!(prompt.contains("Corner Kick"));
    }

    #[test]
    fn test_model_prompt_includes_totals() {
        let stats = key_stats(&[], 0);
        let prompt = model_prompt("anything", &[], &stats);
        assert!(prompt.contains("Games: 0 | Plays: 0"));
        assert!(prompt.contains("(no matching plays in the dataset)"));
    }

    #[test]
    fn test_coach_prompt() {
        let prompt = coach_prompt("q", "r says", "m says");
        assert!(prompt.contains("## RESEARCHER\nr says"));
        assert!(prompt.ends_with("## MODEL\nm says\n"));
    }
}
