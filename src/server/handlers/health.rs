use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "index": state.index.name(),
        "models": {
            "embedding": state.settings.models.embedding,
            "chat": state.settings.models.chat,
            "browsing": state.settings.models.browsing,
        }
    }))
}
