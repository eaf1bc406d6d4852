//! Recording fakes for the external collaborators.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::core::errors::ApiError;
use crate::llm::{ChatRequest, LlmProvider, ResponseRequest};
use crate::rag::{VectorIndex, VectorMatch, VectorRecord};

/// Deterministic stand-in embedding: text length and first byte.
pub fn fake_embedding(text: &str) -> Vec<f32> {
    let first = text.bytes().next().unwrap_or(0);
    vec![text.len() as f32, f32::from(first)]
}

#[derive(Default)]
pub struct MockLlm {
    pub fail_embed_on: HashSet<String>,
    pub fail_chat: bool,
    pub chat_reply: String,
    pub response_payload: Option<Value>,
    pub embed_calls: Mutex<Vec<Vec<String>>>,
    pub chat_calls: Mutex<Vec<(ChatRequest, String)>>,
    pub respond_calls: Mutex<Vec<(ResponseRequest, String)>>,
}

impl MockLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            chat_reply: reply.to_string(),
            ..Self::default()
        }
    }

    pub fn failing_embed_on(texts: &[&str]) -> Self {
        Self {
            fail_embed_on: texts.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_response(payload: Value) -> Self {
        Self {
            response_payload: Some(payload),
            ..Self::default()
        }
    }

    pub fn embed_count(&self) -> usize {
        self.embed_calls.lock().unwrap().len()
    }

    pub fn chat_count(&self) -> usize {
        self.chat_calls.lock().unwrap().len()
    }

    pub fn respond_count(&self) -> usize {
        self.respond_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn embed(&self, inputs: &[String], _model_id: &str) -> Result<Vec<Vec<f32>>, ApiError> {
        self.embed_calls.lock().unwrap().push(inputs.to_vec());
        if inputs.iter().any(|input| self.fail_embed_on.contains(input)) {
            return Err(ApiError::Internal("embedding quota exceeded".to_string()));
        }
        Ok(inputs.iter().map(|input| fake_embedding(input)).collect())
    }

    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, ApiError> {
        self.chat_calls
            .lock()
            .unwrap()
            .push((request, model_id.to_string()));
        if self.fail_chat {
            return Err(ApiError::Internal("chat model overloaded".to_string()));
        }
        Ok(self.chat_reply.clone())
    }

    async fn respond(&self, request: ResponseRequest, model_id: &str) -> Result<Value, ApiError> {
        self.respond_calls
            .lock()
            .unwrap()
            .push((request, model_id.to_string()));
        self.response_payload
            .clone()
            .ok_or_else(|| ApiError::Internal("responses endpoint unavailable".to_string()))
    }
}

#[derive(Default)]
pub struct MockIndex {
    pub matches: Vec<VectorMatch>,
    pub fail_query: bool,
    pub fail_upsert_ids: HashSet<String>,
    pub ignore_upsert_ids: HashSet<String>,
    pub upserts: Mutex<Vec<VectorRecord>>,
    pub queries: Mutex<Vec<(Vec<f32>, usize, bool)>>,
}

impl MockIndex {
    pub fn with_texts(texts: &[Option<&str>]) -> Self {
        let matches = texts
            .iter()
            .enumerate()
            .map(|(rank, text)| VectorMatch {
                id: format!("flavour-{}", rank),
                score: 1.0 - rank as f32 * 0.1,
                metadata: text.map(|t| {
                    let mut map = Map::new();
                    map.insert("text".to_string(), Value::String(t.to_string()));
                    map
                }),
            })
            .collect();
        Self {
            matches,
            ..Self::default()
        }
    }

    pub fn upserted_ids(&self) -> Vec<String> {
        self.upserts
            .lock()
            .unwrap()
            .iter()
            .map(|record| record.id.clone())
            .collect()
    }
}

#[async_trait]
impl VectorIndex for MockIndex {
    fn name(&self) -> &str {
        "mock-index"
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<usize, ApiError> {
        if records.iter().any(|r| self.fail_upsert_ids.contains(&r.id)) {
            return Err(ApiError::Internal("index write rejected".to_string()));
        }
        let stored: Vec<VectorRecord> = records
            .into_iter()
            .filter(|r| !self.ignore_upsert_ids.contains(&r.id))
            .collect();
        let count = stored.len();
        self.upserts.lock().unwrap().extend(stored);
        Ok(count)
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<VectorMatch>, ApiError> {
        self.queries
            .lock()
            .unwrap()
            .push((vector.to_vec(), top_k, include_metadata));
        if self.fail_query {
            return Err(ApiError::Internal("index unreachable".to_string()));
        }
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }
}
