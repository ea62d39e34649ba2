//! Listing data model
//!
//! Read-only listing records as served by the rental backend, plus the
//! request and response shapes of a single page fetch.

mod types;

pub use types::{ListingKey, ListingPage, ListingRecord, PageQuery, DEFAULT_PAGE_SIZE};

#[cfg(test)]
mod tests;
