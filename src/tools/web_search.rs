//! Browsing variant: forward raw user text to a hosted model with the
//! web-search tool enabled, bypassing retrieval.

use serde_json::Value;

use crate::core::config::Settings;
use crate::core::errors::ApiError;
use crate::llm::{LlmProvider, ResponseRequest};

pub const EMPTY_TEXT_ERROR: &str = "No text provided to LLM";

#[derive(Debug, Clone)]
pub struct BrowsingOptions {
    pub model: String,
    pub web_search_tool: String,
    pub fallback_reply: String,
}

impl BrowsingOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            model: settings.models.browsing.clone(),
            web_search_tool: settings.browsing.web_search_tool.clone(),
            fallback_reply: settings.browsing.fallback_reply.clone(),
        }
    }
}

/// Sends `text` unmodified and extracts the reply. Blank input is rejected
/// before any call is made.
pub async fn ask_with_browsing(
    llm: &dyn LlmProvider,
    options: &BrowsingOptions,
    text: &str,
) -> Result<String, ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest(EMPTY_TEXT_ERROR.to_string()));
    }

    let request = ResponseRequest::new(text).with_tool(&options.web_search_tool);
    let payload = llm.respond(request, &options.model).await?;
    Ok(extract_reply(&payload, &options.fallback_reply))
}

/// `output[0].content[0].text`, or `fallback` when that path is absent,
/// not a string, or empty.
pub fn extract_reply(payload: &Value, fallback: &str) -> String {
    payload
        .get("output")
        .and_then(|output| output.get(0))
        .and_then(|item| item.get("content"))
        .and_then(|content| content.get(0))
        .and_then(|block| block.get("text"))
        .and_then(|text| text.as_str())
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
