//! pokecat-lib: Core types and logic for pokecat
//!
//! This crate provides the pieces behind the catalog pages:
//! - `catalog`: upstream client that enumerates and resolves item records
//! - `pages`: static path generation and memoized on-demand page rendering
//! - `favorites`: locally persisted set of favorite item ids
//! - `config`: effective configuration from defaults and environment

pub mod catalog;
pub mod config;
pub mod consts;
pub mod favorites;
pub mod pages;
pub mod platform;
