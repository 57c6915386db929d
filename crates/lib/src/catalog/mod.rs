//! Upstream catalog access.
//!
//! # Modules
//!
//! - [`client`] - HTTP client for the listing and detail endpoints
//! - [`types`] - Item records, sprites, and catalog errors

pub mod client;
mod types;

pub use client::CatalogClient;
pub use types::*;
