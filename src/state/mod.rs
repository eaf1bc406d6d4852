use std::sync::Arc;

use crate::core::config::{Credentials, Settings};
use crate::llm::{LlmProvider, OpenAiProvider};
use crate::rag::{PineconeIndex, RagEngine, RagOptions, VectorIndex};
use crate::tools::web_search::BrowsingOptions;

pub mod error;

use error::InitializationError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Application state shared by every route.
///
/// Clients are built once at startup and reused across requests; only the
/// opt-in per-request credential path builds request-scoped clients, and
/// those share `http`.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub credentials: Credentials,
    pub http: reqwest::Client,
    pub llm: Arc<dyn LlmProvider>,
    pub index: Arc<dyn VectorIndex>,
    pub rag: Arc<RagEngine>,
    pub browsing: BrowsingOptions,
}

impl AppState {
    /// Builds the production clients around loaded settings and credentials.
    pub fn initialize(
        settings: Settings,
        credentials: Credentials,
    ) -> Result<Arc<Self>, InitializationError> {
        let http = build_http_client()?;

        let llm = Arc::new(OpenAiProvider::new(
            http.clone(),
            &settings.endpoints.openai_base_url,
            &credentials.openai_api_key,
        ));
        let index = Arc::new(
            PineconeIndex::new(
                http.clone(),
                &credentials.pinecone_index,
                &credentials.pinecone_host,
                &credentials.pinecone_api_key,
            )
            .with_namespace(settings.retrieval.namespace.clone()),
        );

        Ok(Self::with_clients(settings, credentials, http, llm, index))
    }

    /// Wires state around already-built collaborators.
    pub fn with_clients(
        settings: Settings,
        credentials: Credentials,
        http: reqwest::Client,
        llm: Arc<dyn LlmProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Arc<Self> {
        let rag = Arc::new(RagEngine::new(
            llm.clone(),
            index.clone(),
            RagOptions::from_settings(&settings),
        ));
        let browsing = BrowsingOptions::from_settings(&settings);

        Arc::new(AppState {
            settings: Arc::new(settings),
            credentials,
            http,
            llm,
            index,
            rag,
            browsing,
        })
    }
}

pub fn build_http_client() -> Result<reqwest::Client, InitializationError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(InitializationError::HttpClient)
}
