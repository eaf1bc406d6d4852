pub mod credentials;
pub mod defaults;
pub mod paths;
pub mod settings;
pub mod validation;

use std::path::PathBuf;

use thiserror::Error;

pub use credentials::Credentials;
pub use settings::{
    BrowsingSettings, EndpointSettings, GenerationSettings, IngestionSettings, LoggingSettings,
    ModelSettings, RetrievalSettings, ServerSettings, Settings,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid config at '{path}': {reason}")]
    Invalid { path: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
