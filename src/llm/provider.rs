use async_trait::async_trait;
use serde_json::Value;

use crate::core::errors::ApiError;
use super::types::{ChatRequest, ResponseRequest};

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the provider name (e.g. "openai")
    fn name(&self) -> &str;

    /// generate embeddings, one vector per input in input order
    async fn embed(&self, inputs: &[String], model_id: &str) -> Result<Vec<Vec<f32>>, ApiError>;

    /// chat completion (non-streaming), text of the first choice
    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, ApiError>;

    /// responses API call with hosted tools; the raw payload is returned
    async fn respond(&self, request: ResponseRequest, model_id: &str) -> Result<Value, ApiError>;
}
