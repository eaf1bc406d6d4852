use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "RAG_CONFIG_PATH";
const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Location of the YAML settings file: `RAG_CONFIG_PATH` when set, else
/// `config.yml` in the working directory.
pub fn config_path(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    match lookup(CONFIG_PATH_ENV) {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}
