use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::ApiError;
use crate::llm::{LlmProvider, OpenAiProvider};
use crate::rag::{describe_index_host, PineconeIndex, RagEngine, VectorIndex};
use crate::state::AppState;

pub const EMPTY_QUERY_ERROR: &str = "No query provided";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub openai_key: Option<String>,
    #[serde(default)]
    pub pinecone_key: Option<String>,
    #[serde(default)]
    pub index_name: Option<String>,
}

impl QueryRequest {
    fn has_credentials(&self) -> bool {
        [&self.openai_key, &self.pinecone_key, &self.index_name]
            .iter()
            .any(|field| non_blank(field).is_some())
    }
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub answer: String,
}

/// `POST /query`: embed → retrieve → augment → generate.
pub async fn query(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) = payload?;

    let query = request.query.as_deref().unwrap_or_default();
    if query.trim().is_empty() {
        return Err(ApiError::BadRequest(EMPTY_QUERY_ERROR.to_string()));
    }

    let request_id = Uuid::new_v4();
    tracing::info!("[{}] Query received: {:?}", request_id, query);

    let outcome = match request_scoped_engine(&state, &request).await {
        Ok(Some(engine)) => engine.answer(query).await,
        Ok(None) => state.rag.answer(query).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(answer) => Ok(Json(QueryResponse { answer })),
        Err(err) => {
            tracing::error!("[{}] Query failed: {}", request_id, err);
            Err(err)
        }
    }
}

/// Builds an engine around credentials carried in the body, when the
/// deployment allows it. Fields left out fall back to the process values.
async fn request_scoped_engine(
    state: &AppState,
    request: &QueryRequest,
) -> Result<Option<RagEngine>, ApiError> {
    if !request.has_credentials() {
        return Ok(None);
    }
    if !state.settings.server.allow_request_credentials {
        tracing::debug!("Ignoring credentials in request body; request credentials are disabled");
        return Ok(None);
    }

    let creds = &state.credentials;
    let settings = &state.settings;

    let llm: Arc<dyn LlmProvider> = match non_blank(&request.openai_key) {
        Some(key) => Arc::new(OpenAiProvider::new(
            state.http.clone(),
            &settings.endpoints.openai_base_url,
            key,
        )),
        None => state.llm.clone(),
    };

    let pinecone_key = non_blank(&request.pinecone_key);
    let index_name = non_blank(&request.index_name);
    let index: Arc<dyn VectorIndex> = if pinecone_key.is_none() && index_name.is_none() {
        state.index.clone()
    } else {
        let api_key = pinecone_key.unwrap_or(creds.pinecone_api_key.as_str());
        let name = index_name.unwrap_or(creds.pinecone_index.as_str());
        let host = if name == creds.pinecone_index {
            creds.pinecone_host.clone()
        } else {
            describe_index_host(
                &state.http,
                &settings.endpoints.pinecone_control_url,
                api_key,
                name,
            )
            .await?
        };
        Arc::new(
            PineconeIndex::new(state.http.clone(), name, &host, api_key)
                .with_namespace(settings.retrieval.namespace.clone()),
        )
    };

    Ok(Some(RagEngine::new(llm, index, state.rag.options().clone())))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
