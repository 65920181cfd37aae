use super::grounding::relevant_plays;
use super::prompt::{coach_prompt, PromptSet};
use crate::analysis::KeyStats;
use crate::error::{AnalyticsError, Result};
use crate::model::RawRecord;
use thiserror::Error;

/// Failure reported by a text-completion backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompletionError {
    /// The named model cannot serve requests; the next model may be tried
    #[error("model {0} unavailable")]
    ModelUnavailable(String),

    #[error("{0}")]
    Failed(String),
}

/// An opaque text-completion capability
pub trait TextCompletion {
    fn complete(&mut self, model: &str, prompt: &str) -> std::result::Result<String, CompletionError>;
}

/// The three narrative answers for one question
#[derive(Debug, Clone, PartialEq)]
pub struct Narrative {
    pub researcher: String,
    pub model: String,
    pub coach: String,
}

/// Sends prompts through a completion backend, walking a model fallback list
pub struct Narrator<C> {
    client: C,
    models: Vec<String>,
}

impl<C: TextCompletion> Narrator<C> {
    pub fn new(client: C, models: Vec<String>) -> Self {
        Self { client, models }
    }

    /// Complete `prompt` with the first model that is available.
    ///
    /// Errors other than an unavailable model are returned as-is.
    pub fn complete(&mut self, prompt: &str) -> Result<String> {
        for model in &self.models {
            match self.client.complete(model, prompt) {
                Ok(text) => return Ok(text),
                Err(CompletionError::ModelUnavailable(name)) => {
                    log::warn!("Model {} unavailable, trying next", name);
                }
                Err(CompletionError::Failed(msg)) => return Err(AnalyticsError::Completion(msg)),
            }
        }
        Err(AnalyticsError::NoModelAvailable)
    }

    /// Answer a play question as researcher, model, and finally coach
    pub fn narrate(
        &mut self,
        question: &str,
        records: &[RawRecord],
        stats: &KeyStats,
        limit: usize,
    ) -> Result<Narrative> {
        let rows = relevant_plays(records, question, limit);
        log::info!("Grounding question on {} matching plays", rows.len());

        let prompts = PromptSet::build(question, &rows, stats);
        let researcher = self.complete(&prompts.researcher)?;
        let model = self.complete(&prompts.model)?;
        let coach = self.complete(&coach_prompt(question, &researcher, &model))?;

        Ok(Narrative {
            researcher,
            model,
            coach,
        })
    }
}
