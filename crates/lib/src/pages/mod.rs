//! Detail page generation.
//!
//! - [`materialize`] - static paths, generation pass, memoized rendering
//! - [`types`] - page paths, outcomes, and generation reports

pub mod materialize;
mod types;

pub use materialize::PageCache;
pub use types::*;
