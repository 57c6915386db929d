//! HTTP client for the upstream catalog.
//!
//! Two endpoints are used, both read-only:
//!
//! ```text
//! GET {base}/pokemon?limit=N   -> { "results": [{ "name": ... }] }
//! GET {base}/pokemon/{name}    -> item record, 404 when unknown
//! ```

use std::collections::HashSet;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use super::types::{CatalogError, ItemRecord, ListResponse, normalize_name};
use crate::consts::RESOURCE;

/// Client that enumerates and resolves catalog items.
///
/// Holds no state besides the connection pool: each call goes to the upstream.
#[derive(Debug, Clone)]
pub struct CatalogClient {
  http: reqwest::Client,
  base_url: Url,
}

impl CatalogClient {
  /// Create a client rooted at `base_url` (e.g. `https://pokeapi.co/api/v2`).
  pub fn new(base_url: &str) -> Result<Self, CatalogError> {
    let parsed = Url::parse(base_url).map_err(|e| CatalogError::InvalidBaseUrl {
      url: base_url.to_string(),
      message: e.to_string(),
    })?;

    if parsed.cannot_be_a_base() {
      return Err(CatalogError::InvalidBaseUrl {
        url: base_url.to_string(),
        message: "URL cannot carry a path".to_string(),
      });
    }

    Ok(Self {
      http: reqwest::Client::new(),
      base_url: parsed,
    })
  }

  /// List up to `limit` identifiers known to the upstream, in upstream order.
  ///
  /// Duplicates are dropped and the result never exceeds `limit`.
  #[instrument(skip(self))]
  pub async fn list_known_identifiers(&self, limit: u32) -> Result<Vec<String>, CatalogError> {
    let mut url = self.endpoint(&[RESOURCE])?;
    url.query_pairs_mut().append_pair("limit", &limit.to_string());

    let response = self.get(url.clone()).await?;
    if !response.status().is_success() {
      return Err(CatalogError::UpstreamStatus {
        url: url.to_string(),
        status: response.status().as_u16(),
      });
    }

    let listing: ListResponse = decode(&url, response).await?;

    let mut seen = HashSet::new();
    let names: Vec<String> = listing
      .results
      .into_iter()
      .map(|entry| entry.name)
      .filter(|name| seen.insert(name.clone()))
      .take(limit as usize)
      .collect();

    info!(count = names.len(), "listed known identifiers");
    Ok(names)
  }

  /// Fetch the record for `name`, matching case-insensitively.
  ///
  /// Returns `Ok(None)` when the upstream has no such item.
  #[instrument(skip(self))]
  pub async fn resolve_item(&self, name: &str) -> Result<Option<ItemRecord>, CatalogError> {
    let name = normalize_name(name);
    if name.is_empty() {
      debug!("empty identifier, nothing to resolve");
      return Ok(None);
    }

    let url = self.endpoint(&[RESOURCE, &name])?;
    let response = self.get(url.clone()).await?;

    match response.status() {
      StatusCode::NOT_FOUND => {
        debug!(%name, "item not found upstream");
        Ok(None)
      }
      status if status.is_success() => {
        let record: ItemRecord = decode(&url, response).await?;
        debug!(%name, id = record.id, "resolved item");
        Ok(Some(record))
      }
      status => Err(CatalogError::UpstreamStatus {
        url: url.to_string(),
        status: status.as_u16(),
      }),
    }
  }

  /// Append path segments to the base URL, escaping each one.
  fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| CatalogError::InvalidBaseUrl {
        url: self.base_url.to_string(),
        message: "URL cannot carry a path".to_string(),
      })?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  async fn get(&self, url: Url) -> Result<reqwest::Response, CatalogError> {
    debug!(%url, "GET");
    self
      .http
      .get(url.clone())
      .send()
      .await
      .map_err(|source| CatalogError::UpstreamUnavailable {
        url: url.to_string(),
        source,
      })
  }
}

async fn decode<T: DeserializeOwned>(url: &Url, response: reqwest::Response) -> Result<T, CatalogError> {
  response.json::<T>().await.map_err(|source| CatalogError::Decode {
    url: url.to_string(),
    source,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use mockito::{Matcher, Server};

  const PIKACHU: &str = r#"{
    "id": 25,
    "name": "pikachu",
    "sprites": {
      "front_default": "https://img/25.png",
      "back_default": "https://img/back/25.png",
      "front_shiny": "https://img/shiny/25.png",
      "back_shiny": "https://img/back/shiny/25.png",
      "other": { "dream_world": { "front_default": "https://img/dream/25.svg" } }
    }
  }"#;

  fn listing(count: usize) -> String {
    let results: Vec<_> = (1..=count)
      .map(|i| serde_json::json!({ "name": format!("item{}", i), "url": format!("https://x/{}/", i) }))
      .collect();
    serde_json::json!({ "count": count, "results": results }).to_string()
  }

  #[test]
  fn rejects_unusable_base_url() {
    assert!(matches!(
      CatalogClient::new("not a url"),
      Err(CatalogError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
      CatalogClient::new("mailto:someone@example.com"),
      Err(CatalogError::InvalidBaseUrl { .. })
    ));
  }

  #[test]
  fn endpoint_escapes_segments() {
    let client = CatalogClient::new("https://pokeapi.co/api/v2/").unwrap();
    let url = client.endpoint(&[RESOURCE, "mr mime/x"]).unwrap();
    assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/mr%20mime%2Fx");
  }

  #[tokio::test]
  async fn list_returns_requested_count() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("GET", "/pokemon")
      .match_query(Matcher::UrlEncoded("limit".into(), "151".into()))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(listing(151))
      .create_async()
      .await;

    let client = CatalogClient::new(&server.url()).unwrap();
    let names = client.list_known_identifiers(151).await.unwrap();

    mock.assert_async().await;
    assert_eq!(names.len(), 151);
    assert_eq!(names.iter().collect::<HashSet<_>>().len(), 151);
    assert_eq!(names[0], "item1");
    assert_eq!(names[150], "item151");
  }

  #[tokio::test]
  async fn list_truncates_and_dedupes() {
    let mut server = Server::new_async().await;
    let body = r#"{"results": [{"name": "a"}, {"name": "b"}, {"name": "a"}, {"name": "c"}, {"name": "d"}]}"#;
    let _m = server
      .mock("GET", "/pokemon")
      .match_query(Matcher::Any)
      .with_status(200)
      .with_body(body)
      .create_async()
      .await;

    let client = CatalogClient::new(&server.url()).unwrap();
    let names = client.list_known_identifiers(3).await.unwrap();
    assert_eq!(names, vec!["a", "b", "c"]);
  }

  #[tokio::test]
  async fn list_empty_upstream() {
    let mut server = Server::new_async().await;
    let _m = server
      .mock("GET", "/pokemon")
      .match_query(Matcher::Any)
      .with_status(200)
      .with_body(r#"{"count": 0, "results": []}"#)
      .create_async()
      .await;

    let client = CatalogClient::new(&server.url()).unwrap();
    assert!(client.list_known_identifiers(151).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn list_reports_server_errors() {
    let mut server = Server::new_async().await;
    let _m = server
      .mock("GET", "/pokemon")
      .match_query(Matcher::Any)
      .with_status(503)
      .create_async()
      .await;

    let client = CatalogClient::new(&server.url()).unwrap();
    let result = client.list_known_identifiers(10).await;
    assert!(matches!(result, Err(CatalogError::UpstreamStatus { status: 503, .. })));
  }

  #[tokio::test]
  async fn resolve_is_case_insensitive() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("GET", "/pokemon/pikachu")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(PIKACHU)
      .expect(2)
      .create_async()
      .await;

    let client = CatalogClient::new(&server.url()).unwrap();
    let lower = client.resolve_item("pikachu").await.unwrap().unwrap();
    let upper = client.resolve_item("PIKACHU").await.unwrap().unwrap();

    mock.assert_async().await;
    assert_eq!(lower, upper);
    assert_eq!(lower.name, "pikachu");
    assert!(lower.sprites.front_default.is_some());
  }

  #[tokio::test]
  async fn resolve_missing_is_none() {
    let mut server = Server::new_async().await;
    let _m = server
      .mock("GET", "/pokemon/doesnotexist123")
      .with_status(404)
      .with_body("Not Found")
      .create_async()
      .await;

    let client = CatalogClient::new(&server.url()).unwrap();
    assert!(client.resolve_item("doesnotexist123").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn resolve_empty_name_skips_request() {
    let mut server = Server::new_async().await;
    let mock = server
      .mock("GET", Matcher::Any)
      .expect(0)
      .create_async()
      .await;

    let client = CatalogClient::new(&server.url()).unwrap();
    assert!(client.resolve_item("   ").await.unwrap().is_none());
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn resolve_malformed_body_is_decode_error() {
    let mut server = Server::new_async().await;
    let _m = server
      .mock("GET", "/pokemon/pikachu")
      .with_status(200)
      .with_body("{ not json")
      .create_async()
      .await;

    let client = CatalogClient::new(&server.url()).unwrap();
    let result = client.resolve_item("pikachu").await;
    assert!(matches!(result, Err(CatalogError::Decode { .. })));
  }

  #[tokio::test]
  async fn transport_failure_is_upstream_unavailable() {
    // Bind and drop a listener so the port is very likely closed.
    let port = {
      let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
      listener.local_addr().unwrap().port()
    };
    let client = CatalogClient::new(&format!("http://127.0.0.1:{}", port)).unwrap();

    let result = client.resolve_item("pikachu").await;
    assert!(matches!(result, Err(CatalogError::UpstreamUnavailable { .. })));
  }
}
