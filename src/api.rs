//! HTTP client for the search backend
//!
//! The backend exposes a single endpoint:
//!
//! ```json
//! POST {API_BASE}/search
//! {"query": "파란색 모자", "k": 10}
//! ```
//!
//! and answers with `{"results": [...]}`. Every result field except `id` is
//! optional and the client must tolerate its absence; unknown fields are
//! ignored.

use crate::config::{clamp_k, normalize_base, REQUEST_TIMEOUT};
use crate::error::{Result, SnapFindError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for the search endpoint.
#[derive(Serialize, Debug)]
struct SearchRequest<'a> {
    query: &'a str,
    k: u32,
}

/// Response envelope. `results` defaults to empty when the field is absent.
#[derive(Deserialize, Debug, Default)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// A single search result as returned by the backend.
///
/// Only `id` is conceptually guaranteed; everything else may be missing or
/// null, and derivation helpers substitute defaults.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SearchHit {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub filepath: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
}

impl SearchHit {
    /// The identifier rendered as plain text, without JSON string quoting.
    pub fn id_text(&self) -> Option<String> {
        match &self.id {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Blocking client for the search backend.
///
/// One instance per process; the inner reqwest client pools connections and
/// enforces the 15s request timeout.
#[derive(Clone)]
pub struct SearchClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SearchClient {
    /// Create a client against the given API base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_base(base_url);
        if !base_url.starts_with("http") {
            return Err(SnapFindError::InvalidBaseUrl(
                base_url,
                "expected an http(s) URL".to_string(),
            ));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The normalized API base this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one search request. Single attempt, no retry.
    ///
    /// `query` must already be trimmed and non-empty; `k` is clamped into
    /// [1, 50] before it goes on the wire.
    pub fn search(&self, query: &str, k: u32) -> Result<Vec<SearchHit>> {
        let body = SearchRequest {
            query,
            k: clamp_k(k as i64),
        };

        log::info!("POST {}/search query={:?} k={}", self.base_url, query, body.k);

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapFindError::Status(status.as_u16()));
        }

        let parsed: SearchResponse = response.json()?;
        log::info!("search returned {} results", parsed.results.len());
        Ok(parsed.results)
    }

    /// Fetch raw image bytes for a tile thumbnail.
    pub fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SnapFindError::Status(status.as_u16()));
        }
        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_non_http_base() {
        let result = SearchClient::new("ftp://example.com");
        assert!(matches!(result, Err(SnapFindError::InvalidBaseUrl(_, _))));
    }

    #[test]
    fn new_normalizes_trailing_slash() {
        let client = SearchClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn response_defaults_to_empty_results() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn hit_tolerates_missing_optional_fields() {
        let json = r#"{"id": "item-42"}"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.id_text().as_deref(), Some("item-42"));
        assert!(hit.item_name.is_none());
        assert!(hit.filepath.is_none());
        assert!(hit.label.is_none());
        assert!(hit.image_url.is_none());
        assert!(hit.distance.is_none());
    }

    #[test]
    fn hit_ignores_unknown_fields() {
        let json = r#"{
            "id": 7,
            "item_name": "Red Hat",
            "distance": 0.25,
            "embedding_model": "siglip",
            "shard": 3
        }"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.id_text().as_deref(), Some("7"));
        assert_eq!(hit.item_name.as_deref(), Some("Red Hat"));
        assert_eq!(hit.distance, Some(0.25));
    }

    #[test]
    fn full_response_roundtrip() {
        let json = r#"{
            "results": [
                {"id": "a", "item_name": "Blue Cape", "distance": 0.1,
                 "filepath": "items/cape_blue.png", "label": "파란 망토",
                 "image_url": "/static/cape_blue.png"},
                {"id": "b", "distance": 0.9}
            ],
            "took_ms": 12
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].item_name.as_deref(), Some("Blue Cape"));
        assert!(parsed.results[1].item_name.is_none());
    }

    #[test]
    fn request_clamps_k_before_send() {
        let body = SearchRequest {
            query: "blue hat",
            k: clamp_k(75),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["query"], "blue hat");
        assert_eq!(json["k"], 50);
    }
}
