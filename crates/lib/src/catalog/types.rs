use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::consts::NO_IMAGE;

/// Errors that can occur while talking to the upstream catalog.
///
/// A missing record is not an error: it is reported as `None` by
/// [`CatalogClient::resolve_item`](super::CatalogClient::resolve_item).
#[derive(Debug, Error)]
pub enum CatalogError {
  /// The configured base URL cannot be used to build request URLs.
  #[error("invalid upstream base URL '{url}': {message}")]
  InvalidBaseUrl { url: String, message: String },

  /// The request did not complete (connection refused, DNS, reset, ...).
  #[error("upstream unavailable at '{url}': {source}")]
  UpstreamUnavailable {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// The upstream answered with an unexpected status.
  #[error("upstream returned HTTP {status} for '{url}'")]
  UpstreamStatus { url: String, status: u16 },

  /// The response body did not match the expected shape.
  #[error("failed to decode response from '{url}': {source}")]
  Decode {
    url: String,
    #[source]
    source: reqwest::Error,
  },
}

/// One catalog entry, reduced to the fields pages render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
  pub id: u32,
  pub name: String,
  /// Missing or `null` upstream means no sprites at all.
  #[serde(default, deserialize_with = "null_as_default")]
  pub sprites: Sprites,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ItemRecord {
  /// Alternate artwork if the upstream has one, otherwise the placeholder image.
  pub fn artwork(&self) -> &str {
    self
      .sprites
      .other
      .as_ref()
      .and_then(|other| other.dream_world.as_ref())
      .and_then(|dream_world| dream_world.front_default.as_deref())
      .unwrap_or(NO_IMAGE)
  }
}

/// Image references for an item. Any of them may be missing upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprites {
  pub front_default: Option<String>,
  pub back_default: Option<String>,
  pub front_shiny: Option<String>,
  pub back_shiny: Option<String>,
  pub other: Option<OtherSprites>,
}

impl Sprites {
  /// Named sprite references in display order, skipping absent ones.
  pub fn gallery(&self) -> Vec<(&'static str, &str)> {
    [
      ("front_default", &self.front_default),
      ("back_default", &self.back_default),
      ("front_shiny", &self.front_shiny),
      ("back_shiny", &self.back_shiny),
    ]
    .into_iter()
    .filter_map(|(label, url)| url.as_deref().map(|url| (label, url)))
    .collect()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherSprites {
  pub dream_world: Option<DreamWorld>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DreamWorld {
  pub front_default: Option<String>,
}

/// Body of the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListResponse {
  #[serde(default)]
  pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NamedResource {
  pub name: String,
}

/// Lowercase and trim an identifier the way upstream stores names.
pub fn normalize_name(name: &str) -> String {
  name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  const PIKACHU: &str = r#"{
    "id": 25,
    "name": "pikachu",
    "base_experience": 112,
    "sprites": {
      "front_default": "https://img/25.png",
      "back_default": "https://img/back/25.png",
      "front_shiny": null,
      "back_shiny": "https://img/back/shiny/25.png",
      "other": { "dream_world": { "front_default": "https://img/dream/25.svg" } }
    }
  }"#;

  #[test]
  fn decodes_record_and_ignores_unknown_fields() {
    let record: ItemRecord = serde_json::from_str(PIKACHU).unwrap();
    assert_eq!(record.id, 25);
    assert_eq!(record.name, "pikachu");
    assert_eq!(record.sprites.front_default.as_deref(), Some("https://img/25.png"));
    assert!(record.sprites.front_shiny.is_none());
  }

  #[test]
  fn artwork_prefers_dream_world() {
    let record: ItemRecord = serde_json::from_str(PIKACHU).unwrap();
    assert_eq!(record.artwork(), "https://img/dream/25.svg");
  }

  #[test]
  fn artwork_falls_back_to_placeholder() {
    let record: ItemRecord =
      serde_json::from_str(r#"{"id": 1, "name": "a", "sprites": {"other": {"dream_world": {"front_default": null}}}}"#)
        .unwrap();
    assert_eq!(record.artwork(), NO_IMAGE);

    let bare: ItemRecord = serde_json::from_str(r#"{"id": 1, "name": "a", "sprites": {}}"#).unwrap();
    assert_eq!(bare.artwork(), NO_IMAGE);
  }

  #[test]
  fn absent_or_null_sprites_decode_as_empty() {
    for body in [r#"{"id": 132, "name": "ditto"}"#, r#"{"id": 132, "name": "ditto", "sprites": null}"#] {
      let record: ItemRecord = serde_json::from_str(body).unwrap();
      assert_eq!(record.sprites, Sprites::default());
      assert!(record.sprites.gallery().is_empty());
      assert_eq!(record.artwork(), NO_IMAGE);
    }
  }

  #[test]
  fn gallery_skips_missing_sprites() {
    let record: ItemRecord = serde_json::from_str(PIKACHU).unwrap();
    let labels: Vec<_> = record.sprites.gallery().into_iter().map(|(label, _)| label).collect();
    assert_eq!(labels, vec!["front_default", "back_default", "back_shiny"]);
  }

  #[test]
  fn normalize_lowercases_and_trims() {
    assert_eq!(normalize_name("  PikaChu "), "pikachu");
    assert_eq!(normalize_name(""), "");
  }
}
