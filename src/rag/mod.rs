//! Retrieval-augmented generation over a hosted vector index.
//!
//! - `VectorIndex` / `PineconeIndex`: where knowledge entries live
//! - `RagEngine`: answers a query from retrieved entries
//! - `Ingestor`: loads the knowledge base into the index

mod context_builder;
mod engine;
mod ingest;
pub mod knowledge;
pub mod pinecone;
mod store;

pub use context_builder::{build_context, build_messages};
pub use engine::{RagEngine, RagOptions};
pub use ingest::{FailedEntry, IngestReport, Ingestor};
pub use pinecone::{describe_index_host, PineconeIndex};
pub use store::{VectorIndex, VectorMatch, VectorRecord, TEXT_METADATA_KEY};
