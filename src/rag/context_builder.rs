//! Augment step: turns ranked matches into the two chat messages.

use crate::llm::ChatMessage;
use super::store::VectorMatch;

/// Joins match texts in rank order with newlines. Matches without text are
/// skipped, so zero usable matches yields an empty string.
pub fn build_context(matches: &[VectorMatch]) -> String {
    matches
        .iter()
        .filter_map(VectorMatch::text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// System persona first, then the context block followed by the caller's
/// query.
pub fn build_messages(system_prompt: &str, context: &str, query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(format!("Context:\n{}\n\nUser: {}", context, query)),
    ]
}
