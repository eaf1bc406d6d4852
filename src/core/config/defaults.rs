//! Built-in values used when `config.yml` leaves a field out.

pub const HOST: &str = "127.0.0.1";
pub const PORT: u16 = 3000;
pub const INDEX_FILE: &str = "pipeline.html";

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const PINECONE_CONTROL_URL: &str = "https://api.pinecone.io";

pub const EMBEDDING_MODEL: &str = "text-embedding-3-large";
pub const CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const BROWSING_MODEL: &str = "gpt-4.1";

pub const TOP_K: usize = 5;
pub const MAX_TOKENS: u32 = 150;
pub const TEMPERATURE: f64 = 0.7;

pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant who works at an ice cream shop. \
Keep your responses conversational and concise, suitable for speech synthesis. \
Use the provided context if relevant.";

pub const WEB_SEARCH_TOOL: &str = "web_search_preview_2025_03_11";
pub const FALLBACK_REPLY: &str = "No reply generated";

pub const INGEST_ID_PREFIX: &str = "flavour";

pub const LOG_LEVEL: &str = "info";
pub const LOG_DIR: &str = "logs";
