//! One-shot ingestion of knowledge entries into the vector index.
//!
//! Entries are processed strictly in order. A failure on one entry is
//! logged and recorded; the remaining entries are still ingested.

use std::sync::Arc;

use crate::core::errors::ApiError;
use crate::llm::LlmProvider;
use super::store::{VectorIndex, VectorRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct FailedEntry {
    pub id: String,
    pub text: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub inserted: Vec<String>,
    pub failed: Vec<FailedEntry>,
}

impl IngestReport {
    pub fn total(&self) -> usize {
        self.inserted.len() + self.failed.len()
    }

    pub fn all_failed(&self) -> bool {
        self.inserted.is_empty() && !self.failed.is_empty()
    }
}

pub struct Ingestor {
    llm: Arc<dyn LlmProvider>,
    index: Arc<dyn VectorIndex>,
    embedding_model: String,
    id_prefix: String,
}

impl Ingestor {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        index: Arc<dyn VectorIndex>,
        embedding_model: impl Into<String>,
        id_prefix: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            index,
            embedding_model: embedding_model.into(),
            id_prefix: id_prefix.into(),
        }
    }

    /// `<prefix>-<position>`; re-running overwrites the same ids.
    pub fn entry_id(&self, position: usize) -> String {
        format!("{}-{}", self.id_prefix, position)
    }

    pub async fn ingest(&self, entries: &[String]) -> IngestReport {
        tracing::info!(
            "Starting ingestion of {} entries into index \"{}\"",
            entries.len(),
            self.index.name()
        );

        let mut report = IngestReport::default();
        for (position, text) in entries.iter().enumerate() {
            let id = self.entry_id(position);
            match self.ingest_one(&id, text).await {
                Ok(()) => {
                    tracing::info!("Inserted {}: {}", id, text);
                    report.inserted.push(id);
                }
                Err(err) => {
                    tracing::error!("Failed to insert {} ({:?}): {}", id, text, err);
                    report.failed.push(FailedEntry {
                        id,
                        text: text.clone(),
                        error: err.message().to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Ingestion finished: {} inserted, {} failed",
            report.inserted.len(),
            report.failed.len()
        );
        report
    }

    async fn ingest_one(&self, id: &str, text: &str) -> Result<(), ApiError> {
        let inputs = [text.to_string()];
        let embedding = self
            .llm
            .embed(&inputs, &self.embedding_model)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Internal(format!("no embedding returned for {}", id)))?;

        let stored = self
            .index
            .upsert(vec![VectorRecord::with_text(id, embedding, text)])
            .await?;
        if stored == 0 {
            return Err(ApiError::Internal(format!(
                "index \"{}\" acknowledged no records for {}",
                self.index.name(),
                id
            )));
        }
        Ok(())
    }
}
