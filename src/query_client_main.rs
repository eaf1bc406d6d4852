use std::env;

use anyhow::Context;
use serde_json::{json, Value};

const DEFAULT_URL: &str = "http://localhost:3000/query";
const DEFAULT_QUERY: &str = "What flavors of ice cream do you know about?";

/// Posts one query to a running server and prints the JSON reply.
///
/// Credentials from the environment are sent along; the server only uses
/// them when `server.allow_request_credentials` is enabled.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let url = env::var("QUERY_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let query = env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let query = if query.trim().is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        query
    };

    let body = json!({
        "query": query,
        "openaiKey": env::var("OPENAI_API_KEY").ok(),
        "pineconeKey": env::var("PINECONE_API_KEY").ok(),
        "indexName": env::var("PINECONE_INDEX").ok(),
    });

    let response = reqwest::Client::new()
        .post(&url)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;

    let status = response.status();
    let payload: Value = response
        .json()
        .await
        .context("Server returned a non-JSON body")?;

    println!("Response ({}): {}", status, serde_json::to_string_pretty(&payload)?);
    Ok(())
}
