use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Body for `POST /chat/completions`.
    pub fn to_body(&self, model_id: &str) -> Value {
        let mut body = json!({
            "model": model_id,
            "messages": self.messages,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(t) = self.temperature { obj.insert("temperature".to_string(), json!(t)); }
            if let Some(t) = self.max_tokens { obj.insert("max_tokens".to_string(), json!(t)); }
        }
        body
    }
}

/// A hosted tool enabled on a responses-API call, e.g. web search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostedTool {
    #[serde(rename = "type")]
    pub tool_type: String,
}

/// Input for the responses API. `input` is forwarded exactly as given.
#[derive(Debug, Clone)]
pub struct ResponseRequest {
    pub input: String,
    pub tools: Vec<HostedTool>,
}

impl ResponseRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, tool_type: impl Into<String>) -> Self {
        self.tools.push(HostedTool {
            tool_type: tool_type.into(),
        });
        self
    }

    pub fn to_body(&self, model_id: &str) -> Value {
        let mut body = json!({
            "model": model_id,
            "input": self.input,
        });
        if !self.tools.is_empty() {
            if let Some(obj) = body.as_object_mut() {
                obj.insert("tools".to_string(), json!(self.tools));
            }
        }
        body
    }
}
