use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::core::errors::ApiError;
use super::provider::LlmProvider;
use super::types::{ChatRequest, ResponseRequest};

/// Client for the OpenAI HTTP API (or anything that speaks it).
#[derive(Clone)]
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    client: Client,
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"****")
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json(&self, path: &str, operation: &str, body: &Value) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, path);

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("OpenAI {} request failed: {}", operation, e)))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!(
                "OpenAI {} error ({}): {}",
                operation, status, text
            )));
        }

        res.json().await.map_err(|e| {
            ApiError::Internal(format!("OpenAI {} returned an unreadable body: {}", operation, e))
        })
    }
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn embed(&self, inputs: &[String], model_id: &str) -> Result<Vec<Vec<f32>>, ApiError> {
        let body = serde_json::json!({
            "model": model_id,
            "input": inputs,
        });

        let payload = self.post_json("embeddings", "embeddings", &body).await?;
        let mut response: EmbeddingResponse = serde_json::from_value(payload).map_err(|e| {
            ApiError::Internal(format!("OpenAI embeddings returned an unexpected shape: {}", e))
        })?;

        response.data.sort_by_key(|item| item.index);
        Ok(response.data.into_iter().map(|item| item.embedding).collect())
    }

    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, ApiError> {
        let body = request.to_body(model_id);
        let payload = self.post_json("chat/completions", "chat", &body).await?;

        let Some(choice) = payload["choices"].as_array().and_then(|c| c.first()) else {
            return Err(ApiError::Internal(
                "OpenAI chat returned no choices".to_string(),
            ));
        };

        let content = choice["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        Ok(content)
    }

    async fn respond(&self, request: ResponseRequest, model_id: &str) -> Result<Value, ApiError> {
        let body = request.to_body(model_id);
        self.post_json("responses", "responses", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let provider = OpenAiProvider::new(Client::new(), "https://api.openai.com/v1/", "sk-a");
        assert_eq!(provider.base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn debug_hides_api_key() {
        let provider = OpenAiProvider::new(Client::new(), "https://api.openai.com/v1", "sk-secret");
        assert!(!format!("{provider:?}").contains("sk-secret"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_surfaces_operation_in_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let base_url = format!("http://127.0.0.1:{}", port);
        let provider = OpenAiProvider::new(Client::new(), &base_url, "sk-test");
        let err = provider
            .embed(&["vanilla".to_string()], "text-embedding-3-large")
            .await
            .unwrap_err();
        assert!(err.message().starts_with("OpenAI embeddings request failed"));
    }
}
