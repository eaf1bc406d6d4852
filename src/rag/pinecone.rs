//! Pinecone serverless index client.
//!
//! Talks to the data plane of a single index (`/vectors/upsert`, `/query`)
//! and, for index-name lookups, to the control plane (`/indexes/<name>`).

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::errors::ApiError;
use super::store::{VectorIndex, VectorMatch, VectorRecord};

const API_KEY_HEADER: &str = "Api-Key";
const API_VERSION_HEADER: &str = "X-Pinecone-API-Version";
const API_VERSION: &str = "2024-07";

#[derive(Clone)]
pub struct PineconeIndex {
    name: String,
    base_url: String,
    api_key: String,
    namespace: Option<String>,
    client: Client,
}

impl fmt::Debug for PineconeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PineconeIndex")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("namespace", &self.namespace)
            .field("api_key", &"****")
            .finish()
    }
}

impl PineconeIndex {
    pub fn new(client: Client, name: &str, host: &str, api_key: &str) -> Self {
        Self {
            name: name.to_string(),
            base_url: normalize_host(host),
            api_key: api_key.to_string(),
            namespace: None,
            client,
        }
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace.filter(|ns| !ns.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_VERSION_HEADER, API_VERSION)
    }

    async fn post_json(&self, path: &str, operation: &str, body: &Value) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, path);

        let res = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("Pinecone {} request failed: {}", operation, e)))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!(
                "Pinecone {} error ({}): {}",
                operation, status, text
            )));
        }

        res.json().await.map_err(|e| {
            ApiError::Internal(format!("Pinecone {} returned an unreadable body: {}", operation, e))
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: usize,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<VectorMatch>,
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<usize, ApiError> {
        let mut body = json!({ "vectors": records });
        if let (Some(ns), Some(obj)) = (&self.namespace, body.as_object_mut()) {
            obj.insert("namespace".to_string(), json!(ns));
        }

        let payload = self.post_json("vectors/upsert", "upsert", &body).await?;
        let response: UpsertResponse = serde_json::from_value(payload).map_err(ApiError::internal)?;
        Ok(response.upserted_count)
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<VectorMatch>, ApiError> {
        let mut body = json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": include_metadata,
            "includeValues": false,
        });
        if let (Some(ns), Some(obj)) = (&self.namespace, body.as_object_mut()) {
            obj.insert("namespace".to_string(), json!(ns));
        }

        let payload = self.post_json("query", "query", &body).await?;
        let response: QueryResponse = serde_json::from_value(payload).map_err(|e| {
            ApiError::Internal(format!("Pinecone query returned an unexpected shape: {}", e))
        })?;
        Ok(response.matches)
    }
}

/// Looks up the data-plane host of a named index through the control plane.
pub async fn describe_index_host(
    client: &Client,
    control_url: &str,
    api_key: &str,
    index_name: &str,
) -> Result<String, ApiError> {
    let url = describe_index_url(control_url, index_name)?;

    let res = client
        .get(&url)
        .header(API_KEY_HEADER, api_key)
        .header(API_VERSION_HEADER, API_VERSION)
        .send()
        .await
        .map_err(|e| ApiError::Internal(format!("Pinecone describe index request failed: {}", e)))?;

    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        return Err(ApiError::Internal(format!(
            "Pinecone describe index '{}' error ({}): {}",
            index_name, status, text
        )));
    }

    let payload: Value = res.json().await.map_err(ApiError::internal)?;
    payload["host"]
        .as_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ApiError::Internal(format!("Pinecone index '{}' has no host", index_name))
        })
}

/// The index name is caller-supplied, so it is encoded as exactly one
/// path segment.
fn describe_index_url(control_url: &str, index_name: &str) -> Result<String, ApiError> {
    if matches!(index_name, "" | "." | "..") {
        return Err(ApiError::BadRequest(format!(
            "Invalid index name: {:?}",
            index_name
        )));
    }
    Ok(format!(
        "{}/indexes/{}",
        control_url.trim_end_matches('/'),
        urlencoding::encode(index_name)
    ))
}

/// Index hosts are usually given bare (`name-xyz.svc.pinecone.io`).
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https_scheme() {
        assert_eq!(
            normalize_host("flavours-abc.svc.pinecone.io"),
            "https://flavours-abc.svc.pinecone.io"
        );
        assert_eq!(normalize_host("http://127.0.0.1:5080/"), "http://127.0.0.1:5080");
    }

    #[test]
    fn index_name_stays_inside_one_path_segment() {
        let control = "https://api.pinecone.io/";
        assert_eq!(
            describe_index_url(control, "flavours").unwrap(),
            "https://api.pinecone.io/indexes/flavours"
        );
        assert_eq!(
            describe_index_url(control, "../x").unwrap(),
            "https://api.pinecone.io/indexes/..%2Fx"
        );
        assert_eq!(
            describe_index_url(control, "a?b").unwrap(),
            "https://api.pinecone.io/indexes/a%3Fb"
        );
        assert_eq!(
            describe_index_url(control, "a/b#c").unwrap(),
            "https://api.pinecone.io/indexes/a%2Fb%23c"
        );
    }

    #[test]
    fn dot_segments_are_rejected() {
        for name in ["", ".", ".."] {
            let err = describe_index_url("https://api.pinecone.io", name).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)), "{name:?} accepted");
        }
    }

    #[test]
    fn empty_namespace_is_dropped() {
        let index = PineconeIndex::new(Client::new(), "flavours", "host", "key")
            .with_namespace(Some(String::new()));
        assert!(index.namespace.is_none());
    }

    #[test]
    fn upsert_body_uses_pinecone_field_names() {
        let records = vec![VectorRecord::with_text("flavour-0", vec![0.5], "Vanilla")];
        let body = json!({ "vectors": records });
        assert_eq!(
            body,
            json!({
                "vectors": [{
                    "id": "flavour-0",
                    "values": [0.5],
                    "metadata": { "text": "Vanilla" }
                }]
            })
        );
    }

    #[test]
    fn query_response_tolerates_missing_metadata_and_extra_fields() {
        let response: QueryResponse = serde_json::from_value(json!({
            "matches": [
                { "id": "flavour-1", "score": 0.91, "values": [], "metadata": { "text": "Chocolate" } },
                { "id": "flavour-3", "score": 0.42, "values": [] }
            ],
            "namespace": "",
            "usage": { "readUnits": 5 }
        }))
        .unwrap();

        assert_eq!(response.matches.len(), 2);
        assert_eq!(response.matches[0].text(), Some("Chocolate"));
        assert_eq!(response.matches[1].text(), None);
    }
}
