use std::env;
use std::fmt;

use super::ConfigError;

const REDACT_PLACEHOLDER: &str = "****";

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const PINECONE_API_KEY: &str = "PINECONE_API_KEY";
pub const PINECONE_INDEX: &str = "PINECONE_INDEX";
pub const PINECONE_HOST: &str = "PINECONE_HOST";

/// Secrets and index coordinates read from the process environment.
///
/// Every field is required. Loading fails with the full list of missing
/// names so a misconfigured deployment aborts before it serves or ingests.
#[derive(Clone)]
pub struct Credentials {
    pub openai_api_key: String,
    pub pinecone_api_key: String,
    pub pinecone_index: String,
    pub pinecone_host: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut read = |key: &'static str| -> String {
            match lookup(key).map(|value| value.trim().to_string()) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push(key);
                    String::new()
                }
            }
        };

        let credentials = Credentials {
            openai_api_key: read(OPENAI_API_KEY),
            pinecone_api_key: read(PINECONE_API_KEY),
            pinecone_index: read(PINECONE_INDEX),
            pinecone_host: read(PINECONE_HOST),
        };

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing));
        }
        Ok(credentials)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &REDACT_PLACEHOLDER)
            .field("pinecone_api_key", &REDACT_PLACEHOLDER)
            .field("pinecone_index", &self.pinecone_index)
            .field("pinecone_host", &self.pinecone_host)
            .finish()
    }
}
