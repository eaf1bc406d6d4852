//! RAG engine: embed → retrieve → augment → generate.
//!
//! Each step awaits the previous one; there is no parallelism, retry or
//! partial result. The first failing collaborator ends the request.

use std::sync::Arc;

use crate::core::config::Settings;
use crate::core::errors::ApiError;
use crate::llm::{ChatRequest, LlmProvider};
use super::context_builder::{build_context, build_messages};
use super::store::VectorIndex;

/// Models and sampling settings for one engine.
#[derive(Debug, Clone)]
pub struct RagOptions {
    pub embedding_model: String,
    pub chat_model: String,
    pub top_k: usize,
    pub max_tokens: u32,
    pub temperature: f64,
    pub system_prompt: String,
}

impl RagOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            embedding_model: settings.models.embedding.clone(),
            chat_model: settings.models.chat.clone(),
            top_k: settings.retrieval.top_k,
            max_tokens: settings.generation.max_tokens,
            temperature: settings.generation.temperature,
            system_prompt: settings.generation.system_prompt.clone(),
        }
    }
}

impl Default for RagOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

pub struct RagEngine {
    llm: Arc<dyn LlmProvider>,
    index: Arc<dyn VectorIndex>,
    options: RagOptions,
}

impl RagEngine {
    pub fn new(llm: Arc<dyn LlmProvider>, index: Arc<dyn VectorIndex>, options: RagOptions) -> Self {
        Self { llm, index, options }
    }

    pub fn options(&self) -> &RagOptions {
        &self.options
    }

    /// Answers `query` from the indexed knowledge.
    pub async fn answer(&self, query: &str) -> Result<String, ApiError> {
        let embedding = self.embed_query(query).await?;

        let matches = self
            .index
            .query(&embedding, self.options.top_k, true)
            .await?;
        tracing::info!(
            "{} results: {} matches found",
            self.index.name(),
            matches.len()
        );

        let context = build_context(&matches);
        tracing::debug!("Retrieved context: {:?}", context);

        let messages = build_messages(&self.options.system_prompt, &context, query);
        let request = ChatRequest::new(messages)
            .with_max_tokens(self.options.max_tokens)
            .with_temperature(self.options.temperature);

        self.llm.chat(request, &self.options.chat_model).await
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, ApiError> {
        let inputs = [query.to_string()];
        self.llm
            .embed(&inputs, &self.options.embedding_model)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ApiError::Internal(format!(
                    "{} returned no embedding for the query",
                    self.llm.name()
                ))
            })
    }
}
