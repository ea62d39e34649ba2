//! Pagination module
//!
//! Incremental, category-scoped listing loading.
//!
//! # Overview
//!
//! A [`PaginatedListLoader`] is driven by two external triggers: activating a
//! category ([`PaginatedListLoader::reset`]) and approaching the end of the
//! list ([`PaginatedListLoader::load_next`]). Each successful fetch appends
//! one page; a short page marks the category exhausted.

mod loader;
mod types;

pub use loader::PaginatedListLoader;
pub use types::{
    ErrorPolicy, LoadOutcome, LoaderConfig, LoaderSnapshot, PagingState, SkipReason,
};
