use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use talk_rag_backend::core::config::{Credentials, Settings};
use talk_rag_backend::core::logging;
use talk_rag_backend::server;
use talk_rag_backend::state::error::InitializationError;
use talk_rag_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;
    logging::init(&settings.logging, "server.log");

    let state = Credentials::from_env()
        .map_err(InitializationError::Config)
        .and_then(|credentials| AppState::initialize(settings, credentials))
        .inspect_err(|err| tracing::error!("Startup failed: {}", err))
        .context("Startup failed")?;

    let bind_addr = state.settings.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;

    tracing::info!(
        "Server running on http://{} (index \"{}\", chat model {})",
        addr,
        state.credentials.pinecone_index,
        state.settings.models.chat
    );

    let app: Router = server::router::router(state.clone());

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
