use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::defaults;
use super::paths::config_path;
use super::validation::validate_settings;
use super::ConfigError;

/// Non-secret tunables, read from `config.yml` with environment overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub endpoints: EndpointSettings,
    pub models: ModelSettings,
    pub retrieval: RetrievalSettings,
    pub generation: GenerationSettings,
    pub browsing: BrowsingSettings,
    pub ingestion: IngestionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
    pub static_dir: Option<PathBuf>,
    pub index_file: String,
    /// Honor `openaiKey`/`pineconeKey`/`indexName` in `/query` bodies.
    pub allow_request_credentials: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            cors_allowed_origins: Vec::new(),
            static_dir: None,
            index_file: defaults::INDEX_FILE.to_string(),
            allow_request_credentials: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub openai_base_url: String,
    pub pinecone_control_url: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            openai_base_url: defaults::OPENAI_BASE_URL.to_string(),
            pinecone_control_url: defaults::PINECONE_CONTROL_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub embedding: String,
    pub chat: String,
    pub browsing: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            embedding: defaults::EMBEDDING_MODEL.to_string(),
            chat: defaults::CHAT_MODEL.to_string(),
            browsing: defaults::BROWSING_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub namespace: Option<String>,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: defaults::TOP_K,
            namespace: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f64,
    pub system_prompt: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: defaults::MAX_TOKENS,
            temperature: defaults::TEMPERATURE,
            system_prompt: defaults::SYSTEM_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowsingSettings {
    pub web_search_tool: String,
    pub fallback_reply: String,
}

impl Default for BrowsingSettings {
    fn default() -> Self {
        Self {
            web_search_tool: defaults::WEB_SEARCH_TOOL.to_string(),
            fallback_reply: defaults::FALLBACK_REPLY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestionSettings {
    pub id_prefix: String,
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            id_prefix: defaults::INGEST_ID_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub log_dir: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            log_dir: PathBuf::from(defaults::LOG_DIR),
        }
    }
}

impl Settings {
    /// Loads `.env`, the YAML file and the environment overrides, then
    /// validates the result.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_with(|key| env::var(key).ok())
    }

    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = config_path(&lookup);
        let mut settings = Self::from_file(&path)?;
        settings.apply_overrides(&lookup)?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Reads a YAML settings file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(host) = read("HOST") {
            self.server.host = host;
        }
        if let Some(port) = read("PORT") {
            self.server.port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::invalid("PORT", format!("'{port}' is not a valid port")))?;
        }
        if let Some(url) = read("OPENAI_BASE_URL") {
            self.endpoints.openai_base_url = url;
        }
        if let Some(url) = read("PINECONE_CONTROL_URL") {
            self.endpoints.pinecone_control_url = url;
        }
        if let Some(dir) = read("LOG_DIR") {
            self.logging.log_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: Vec<(&str, String)>) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_shop_deployment() {
        let settings = Settings::default();
        assert_eq!(settings.models.embedding, "text-embedding-3-large");
        assert_eq!(settings.models.chat, "gpt-3.5-turbo");
        assert_eq!(settings.models.browsing, "gpt-4.1");
        assert_eq!(settings.retrieval.top_k, 5);
        assert_eq!(settings.generation.max_tokens, 150);
        assert!((settings.generation.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(settings.ingestion.id_prefix, "flavour");
        assert_eq!(settings.server.port, 3000);
        assert!(!settings.server.allow_request_credentials);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let settings = Settings::from_yaml(
            "retrieval:\n  top_k: 3\nserver:\n  allow_request_credentials: true\n",
        )
        .unwrap();
        assert_eq!(settings.retrieval.top_k, 3);
        assert!(settings.server.allow_request_credentials);
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.models.chat, "gpt-3.5-turbo");
    }

    #[test]
    fn load_reads_file_and_applies_env_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "models:\n  chat: gpt-4o-mini\nserver:\n  port: 8080").unwrap();

        let settings = Settings::load_with(lookup_from(vec![
            ("RAG_CONFIG_PATH", file.path().to_string_lossy().to_string()),
            ("PORT", "9090".to_string()),
            ("OPENAI_BASE_URL", "http://127.0.0.1:1234/v1".to_string()),
        ]))
        .unwrap();

        assert_eq!(settings.models.chat, "gpt-4o-mini");
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.endpoints.openai_base_url, "http://127.0.0.1:1234/v1");
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_with(lookup_from(vec![(
            "RAG_CONFIG_PATH",
            dir.path().join("absent.yml").to_string_lossy().to_string(),
        )]))
        .unwrap();
        assert_eq!(settings.retrieval.top_k, 5);
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_with(lookup_from(vec![
            (
                "RAG_CONFIG_PATH",
                dir.path().join("absent.yml").to_string_lossy().to_string(),
            ),
            ("PORT", "not-a-port".to_string()),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn malformed_yaml_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retrieval: [unclosed").unwrap();
        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn sample_config_matches_defaults() {
        let sample = Settings::from_yaml(include_str!("../../../config.example.yml")).unwrap();
        let defaults = Settings::default();
        assert_eq!(sample.bind_addr(), defaults.bind_addr());
        assert_eq!(sample.models.embedding, defaults.models.embedding);
        assert_eq!(sample.retrieval.top_k, defaults.retrieval.top_k);
        assert_eq!(sample.browsing.web_search_tool, defaults.browsing.web_search_tool);
        assert_eq!(sample.generation.system_prompt, defaults.generation.system_prompt);
        assert!(sample.server.static_dir.is_none());
    }
}
