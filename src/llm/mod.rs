//! Fallback answer generation
//!
//! When no cached question is similar enough, the question is handed to a
//! generative model. The generator is an external collaborator: the engine
//! only depends on the [`AnswerGenerator`] seam.

pub mod client;
pub mod prompts;

use async_trait::async_trait;
pub use client::LlmService;

use crate::errors::Result;

/// Produces a free-text answer for a question the corpus cannot cover.
///
/// Fails with [`crate::FaqRagError::GenerationUnavailable`] when the backend
/// cannot be reached or returns a non-success status.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, question: &str) -> Result<String>;
}

/// Style applied to generation prompts
#[derive(Debug, Clone, Default)]
pub struct GenerationStyle {
    /// Persona instruction prefixed to the prompt
    pub persona: Option<String>,
    /// Advisory word limit; not enforced on the generator's output
    pub word_limit: Option<usize>,
}

impl GenerationStyle {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        Self {
            persona: config.llm.persona.clone(),
            word_limit: Some(config.llm.answer_word_limit),
        }
    }
}
