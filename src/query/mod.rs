//! Grounding natural-language play questions in the dataset
//!
//! Matching rows are picked with a keyword filter and rendered into prompts for
//! an external text-completion service. No network client lives here; callers
//! plug one in through [`TextCompletion`].

pub mod grounding;
pub mod narrator;
pub mod prompt;

pub use grounding::{keywords, relevant_plays, DEFAULT_MATCH_LIMIT};
pub use narrator::{CompletionError, Narrative, Narrator, TextCompletion};
pub use prompt::{coach_prompt, model_prompt, researcher_prompt, PromptSet};
