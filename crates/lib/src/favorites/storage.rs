//! Key/value storage port for client-local state.
//!
//! # Storage Layout
//!
//! [`FileStorage`] keeps one file per key:
//!
//! ```text
//! {data_dir}/
//! └── <key>.json          # raw value as written by the caller
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("invalid storage key '{0}'")]
  InvalidKey(String),

  #[error("failed to create storage directory '{path}': {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write '{path}': {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("stored value for '{key}' is unreadable: {source}")]
  Corrupt {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to encode value for '{key}': {source}")]
  Encode {
    key: String,
    #[source]
    source: serde_json::Error,
  },
}

/// String key/value storage, synchronous and local.
pub trait Storage {
  /// Read the value stored under `key`, `None` if nothing was stored.
  fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

  /// Store `value` under `key`, replacing any previous value.
  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  entries: HashMap<String, String>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Storage for MemoryStorage {
  fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    self.entries.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// Storage backed by one JSON file per key.
///
/// Writes go to a temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStorage {
  base_path: PathBuf,
}

impl FileStorage {
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self {
      base_path: base_path.into(),
    }
  }

  fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
    let valid = !key.is_empty()
      && key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
      return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(self.base_path.join(format!("{}.json", key)))
  }
}

impl Storage for FileStorage {
  fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    let path = self.key_path(key)?;
    match fs::read_to_string(&path) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(source) => Err(StorageError::Read { path, source }),
    }
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    let path = self.key_path(key)?;
    fs::create_dir_all(&self.base_path).map_err(|source| StorageError::CreateDir {
      path: self.base_path.clone(),
      source,
    })?;

    // The temp file is removed on drop, so a failed persist leaves nothing behind.
    let mut temp = NamedTempFile::new_in(&self.base_path).map_err(|source| StorageError::Write {
      path: self.base_path.clone(),
      source,
    })?;
    temp
      .write_all(value.as_bytes())
      .map_err(|source| StorageError::Write {
        path: temp.path().to_path_buf(),
        source,
      })?;
    temp
      .persist(&path)
      .map_err(|e| StorageError::Write { path, source: e.error })?;

    Ok(())
  }
}
