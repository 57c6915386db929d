//! Effective configuration.
//!
//! Values are layered: built-in defaults, then environment variables
//! (`POKECAT_BASE_URL`, `POKECAT_DATA_DIR`), then explicit overrides applied by
//! the caller (command-line flags).

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::consts::{DEFAULT_BASE_URL, DEFAULT_LIMIT, ENV_BASE_URL, ENV_DATA_DIR, REVALIDATE};
use crate::platform::paths::data_dir;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("could not determine a data directory; set {ENV_DATA_DIR} or HOME")]
  NoDataDir,

  #[error("{var} is set but empty")]
  EmptyVar { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
  /// Upstream API root, without the resource segment.
  pub base_url: String,
  /// Directory holding client-local state such as favorites.
  pub data_dir: PathBuf,
  /// Identifiers enumerated at generation time.
  pub limit: u32,
  #[serde(rename = "revalidate_secs", serialize_with = "serialize_secs")]
  pub revalidate: Duration,
}

fn serialize_secs<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_u64(value.as_secs())
}

impl Config {
  /// Build the configuration from defaults and the environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    let base_url = match std::env::var(ENV_BASE_URL) {
      Ok(url) if url.trim().is_empty() => return Err(ConfigError::EmptyVar { var: ENV_BASE_URL }),
      Ok(url) => url.trim().trim_end_matches('/').to_string(),
      Err(_) => DEFAULT_BASE_URL.to_string(),
    };

    let data_dir = match std::env::var_os(ENV_DATA_DIR) {
      Some(dir) if dir.is_empty() => return Err(ConfigError::EmptyVar { var: ENV_DATA_DIR }),
      Some(dir) => PathBuf::from(dir),
      None => data_dir().ok_or(ConfigError::NoDataDir)?,
    };

    Ok(Self {
      base_url,
      data_dir,
      limit: DEFAULT_LIMIT,
      revalidate: REVALIDATE,
    })
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into().trim_end_matches('/').to_string();
    self
  }

  pub fn with_limit(mut self, limit: u32) -> Self {
    self.limit = limit;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn defaults_without_environment() {
    temp_env::with_vars(
      [
        (ENV_BASE_URL, None::<&str>),
        (ENV_DATA_DIR, Some("/tmp/pokecat-data")),
      ],
      || {
        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pokecat-data"));
        assert_eq!(config.limit, 151);
        assert_eq!(config.revalidate, Duration::from_secs(86_400));
      },
    );
  }

  #[test]
  #[serial]
  fn base_url_from_environment_drops_trailing_slash() {
    temp_env::with_vars(
      [
        (ENV_BASE_URL, Some("http://localhost:1234/api/")),
        (ENV_DATA_DIR, Some("/tmp/pokecat-data")),
      ],
      || {
        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:1234/api");
      },
    );
  }

  #[test]
  #[serial]
  fn empty_base_url_is_rejected() {
    temp_env::with_vars([(ENV_BASE_URL, Some("  ")), (ENV_DATA_DIR, Some("/tmp/x"))], || {
      let result = Config::from_env();
      assert!(matches!(result, Err(ConfigError::EmptyVar { var: ENV_BASE_URL })));
    });
  }

  #[test]
  #[serial]
  fn overrides_apply_after_environment() {
    temp_env::with_vars(
      [
        (ENV_BASE_URL, Some("http://from-env")),
        (ENV_DATA_DIR, Some("/tmp/pokecat-data")),
      ],
      || {
        let config = Config::from_env().unwrap().with_base_url("http://from-flag/").with_limit(10);
        assert_eq!(config.base_url, "http://from-flag");
        assert_eq!(config.limit, 10);
      },
    );
  }

  #[test]
  fn serializes_revalidate_as_seconds() {
    let config = Config {
      base_url: "http://x".into(),
      data_dir: PathBuf::from("/d"),
      limit: 1,
      revalidate: Duration::from_secs(60),
    };
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["revalidate_secs"], 60);
  }
}
