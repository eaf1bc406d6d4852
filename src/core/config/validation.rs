use super::{ConfigError, Settings};

pub fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    validate_non_empty("server.host", &settings.server.host)?;
    for (index, origin) in settings.server.cors_allowed_origins.iter().enumerate() {
        validate_non_empty(&format!("server.cors_allowed_origins[{}]", index), origin)?;
    }

    validate_non_empty("endpoints.openai_base_url", &settings.endpoints.openai_base_url)?;
    validate_non_empty(
        "endpoints.pinecone_control_url",
        &settings.endpoints.pinecone_control_url,
    )?;

    validate_non_empty("models.embedding", &settings.models.embedding)?;
    validate_non_empty("models.chat", &settings.models.chat)?;
    validate_non_empty("models.browsing", &settings.models.browsing)?;

    validate_range("retrieval.top_k", settings.retrieval.top_k as u64, 1, 10_000)?;
    validate_range(
        "generation.max_tokens",
        u64::from(settings.generation.max_tokens),
        1,
        1_000_000,
    )?;

    let temperature = settings.generation.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        return Err(ConfigError::invalid(
            "generation.temperature",
            "must be between 0.0 and 2.0",
        ));
    }

    validate_non_empty("browsing.web_search_tool", &settings.browsing.web_search_tool)?;
    validate_non_empty("ingestion.id_prefix", &settings.ingestion.id_prefix)?;

    Ok(())
}

fn validate_non_empty(path: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(path, "value cannot be empty"));
    }
    Ok(())
}

fn validate_range(path: &str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::invalid(
            path,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
