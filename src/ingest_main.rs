use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};

use talk_rag_backend::core::logging;
use talk_rag_backend::core::config::{Credentials, Settings};
use talk_rag_backend::llm::OpenAiProvider;
use talk_rag_backend::rag::{knowledge, Ingestor, PineconeIndex};
use talk_rag_backend::state::build_http_client;

/// Embeds the knowledge base and upserts it into the configured index.
/// An optional first argument names a text file with one entry per line.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;
    logging::init(&settings.logging, "ingest.log");
    let credentials = Credentials::from_env()
        .inspect_err(|err| tracing::error!("{}", err))
        .context("Failed to load credentials")?;

    let entries = match std::env::args().nth(1) {
        Some(path) => knowledge::load_entries(&PathBuf::from(path))?,
        None => knowledge::default_entries(),
    };

    let http = build_http_client()?;
    let llm = Arc::new(OpenAiProvider::new(
        http.clone(),
        &settings.endpoints.openai_base_url,
        &credentials.openai_api_key,
    ));
    let index = Arc::new(
        PineconeIndex::new(
            http,
            &credentials.pinecone_index,
            &credentials.pinecone_host,
            &credentials.pinecone_api_key,
        )
        .with_namespace(settings.retrieval.namespace.clone()),
    );

    let ingestor = Ingestor::new(
        llm,
        index,
        settings.models.embedding.clone(),
        settings.ingestion.id_prefix.clone(),
    );
    let report = ingestor.ingest(&entries).await;

    for failed in &report.failed {
        tracing::warn!("Not ingested: {} ({})", failed.id, failed.error);
    }

    if report.all_failed() {
        bail!("Every one of {} entries failed to ingest", report.total());
    }

    tracing::info!(
        "Knowledge base ready in index \"{}\": {}/{} entries stored",
        credentials.pinecone_index,
        report.inserted.len(),
        report.total()
    );
    Ok(())
}
