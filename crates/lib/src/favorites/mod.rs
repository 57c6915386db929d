//! Locally persisted favorites.
//!
//! - [`storage`] - storage port with in-memory and file-backed implementations
//! - [`store`] - the favorites set built on top of a storage port

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{Favorites, Toggle};
