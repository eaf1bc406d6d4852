use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::core::config::ServerSettings;
use crate::server::handlers::{ask, health, query};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// - `POST /query`: retrieval-augmented answer
/// - `POST /ask`: browsing answer, no retrieval
/// - `GET /health`
/// - the static front end, when `server.static_dir` is configured
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = build_cors_layer(&state.settings.server);

    let mut app = Router::new()
        .route("/health", get(health::health))
        .route("/query", post(query::query))
        .route("/ask", post(ask::ask));

    if let Some(static_dir) = &state.settings.server.static_dir {
        let index_file = static_dir.join(&state.settings.server.index_file);
        tracing::info!("Serving static files from {}", static_dir.display());
        app = app
            .route_service("/", ServeFile::new(index_file))
            .fallback_service(ServeDir::new(static_dir));
    }

    app.layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(server: &ServerSettings) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = server
        .cors_allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed_origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
}
