//! The favorites set.
//!
//! Stored under [`FAVORITES_KEY`] as a JSON array of item ids in the order they
//! were added. There is a single writer, so reads and writes are not
//! coordinated.

use tracing::{debug, warn};

use super::storage::{Storage, StorageError};
use crate::consts::FAVORITES_KEY;

/// Which way a toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
  Added,
  Removed,
}

impl Toggle {
  pub fn is_favorite(self) -> bool {
    matches!(self, Toggle::Added)
  }
}

/// Favorite item ids persisted through a [`Storage`] port.
#[derive(Debug, Clone)]
pub struct Favorites<S> {
  storage: S,
}

impl<S: Storage> Favorites<S> {
  pub fn new(storage: S) -> Self {
    Self { storage }
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  /// Whether `id` is marked favorite. Unreadable storage counts as empty.
  pub fn is_favorite(&self, id: u32) -> bool {
    self.load().contains(&id)
  }

  /// All favorite ids, oldest first. Unreadable storage counts as empty.
  pub fn favorites(&self) -> Vec<u32> {
    self.load()
  }

  /// Remove `id` if present, add it otherwise.
  ///
  /// A storage that cannot be read is left untouched and the error returned,
  /// so other ids are never lost. A stored payload that does not parse is
  /// replaced: it cannot be recovered anyway.
  pub fn toggle_favorite(&mut self, id: u32) -> Result<Toggle, StorageError> {
    let mut ids = match self.try_load() {
      Ok(ids) => ids,
      Err(e @ StorageError::Corrupt { .. }) => {
        warn!(error = %e, "replacing unreadable favorites");
        Vec::new()
      }
      Err(e) => return Err(e),
    };

    let toggle = if let Some(pos) = ids.iter().position(|&existing| existing == id) {
      ids.remove(pos);
      Toggle::Removed
    } else {
      ids.push(id);
      Toggle::Added
    };

    self.save(&ids)?;
    debug!(id, ?toggle, total = ids.len(), "toggled favorite");
    Ok(toggle)
  }

  /// Forget every favorite.
  pub fn clear(&mut self) -> Result<(), StorageError> {
    self.save(&[])
  }

  fn load(&self) -> Vec<u32> {
    match self.try_load() {
      Ok(ids) => ids,
      Err(e) => {
        warn!(error = %e, "ignoring unreadable favorites");
        Vec::new()
      }
    }
  }

  fn try_load(&self) -> Result<Vec<u32>, StorageError> {
    match self.storage.get(FAVORITES_KEY)? {
      Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
        key: FAVORITES_KEY.to_string(),
        source,
      }),
      None => Ok(Vec::new()),
    }
  }

  fn save(&mut self, ids: &[u32]) -> Result<(), StorageError> {
    let raw = serde_json::to_string(ids).map_err(|source| StorageError::Encode {
      key: FAVORITES_KEY.to_string(),
      source,
    })?;
    self.storage.set(FAVORITES_KEY, &raw)
  }
}
