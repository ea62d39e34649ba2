//! Listing data providers
//!
//! The paginated loader never talks to a transport directly. It goes through
//! a [`ListingProvider`], selected once from configuration:
//!
//! - [`HttpListingProvider`] - the REST backend (`/get_farmhouses`, `/get_farmhouse/{id}`)
//! - [`FixtureListingProvider`] - a bundled JSON array of listings held in memory

mod fixture;
mod http;

pub use fixture::FixtureListingProvider;
pub use http::{HttpListingProvider, DETAIL_PATH, PAGE_PATH};

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::listing::{ListingPage, ListingRecord, PageQuery};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of listing pages and listing details
#[async_trait]
pub trait ListingProvider: Send + Sync {
    /// Fetch one page of listings for a category
    async fn fetch_page(&self, query: &PageQuery) -> Result<ListingPage>;

    /// Fetch a single listing by id, `None` when it does not exist
    async fn fetch_listing(&self, id: u64) -> Result<Option<ListingRecord>>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Build the provider selected by configuration
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn ListingProvider>> {
    match config {
        ProviderConfig::Http(http) => {
            let provider = HttpListingProvider::new(http.client_config())?;
            Ok(Arc::new(provider))
        }
        ProviderConfig::Fixture { path } => {
            let provider = FixtureListingProvider::from_file(path)?;
            Ok(Arc::new(provider))
        }
    }
}
