use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::ApiError;
use crate::state::AppState;
use crate::tools::web_search::{ask_with_browsing, EMPTY_TEXT_ERROR};

pub const LLM_FAILURE_ERROR: &str = "LLM request failed";

#[derive(Debug, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub reply: String,
}

/// `POST /ask`: browsing variant. The caller only ever sees the generic
/// failure text; upstream detail stays in the server log.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let text = match payload {
        Ok(Json(request)) => request.text.unwrap_or_default(),
        Err(rejection) => {
            tracing::warn!("Unreadable /ask body: {}", rejection.body_text());
            return Err(ApiError::BadRequest(EMPTY_TEXT_ERROR.to_string()));
        }
    };

    let request_id = Uuid::new_v4();
    match ask_with_browsing(state.llm.as_ref(), &state.browsing, &text).await {
        Ok(reply) => {
            tracing::info!("[{}] Browsing reply generated", request_id);
            Ok(Json(AskResponse { reply }))
        }
        Err(err @ ApiError::BadRequest(_)) => Err(err),
        Err(err) => {
            tracing::error!("[{}] {} error: {}", request_id, state.llm.name(), err);
            Err(ApiError::Internal(LLM_FAILURE_ERROR.to_string()))
        }
    }
}
