//! Retrieval-augmented voice assistant backend for an ice cream shop.
//!
//! One process serves `POST /query` (embed → retrieve → augment → generate)
//! and `POST /ask` (hosted model with web search). The `ingest` binary
//! loads the knowledge base into the vector index.

pub mod core;
pub mod llm;
pub mod rag;
pub mod server;
pub mod state;
pub mod tools;

#[cfg(test)]
mod test_support;
