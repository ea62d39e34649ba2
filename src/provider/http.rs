//! REST listing provider

use super::ListingProvider;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::listing::{ListingPage, ListingRecord, PageQuery};
use async_trait::async_trait;
use tracing::debug;

/// Path of the paged listing endpoint
pub const PAGE_PATH: &str = "/get_farmhouses";

/// Path prefix of the listing detail endpoint
pub const DETAIL_PATH: &str = "/get_farmhouse";

/// Listing provider backed by the rental REST API
#[derive(Debug)]
pub struct HttpListingProvider {
    client: HttpClient,
}

impl HttpListingProvider {
    /// Create a provider with its own HTTP client
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        Ok(Self::with_client(HttpClient::with_config(config)?))
    }

    /// Create a provider around an existing client
    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListingProvider for HttpListingProvider {
    async fn fetch_page(&self, query: &PageQuery) -> Result<ListingPage> {
        query.validate()?;
        debug!(
            "GET {} category={} page={} limit={}",
            PAGE_PATH, query.category, query.page, query.page_size
        );

        let request = RequestConfig::new().query_params(query.to_params());
        self.client.get_json_with_config(PAGE_PATH, request).await
    }

    async fn fetch_listing(&self, id: u64) -> Result<Option<ListingRecord>> {
        let url = format!("{DETAIL_PATH}/{id}");
        match self.client.get_json::<Option<ListingRecord>>(&url).await {
            Ok(record) => Ok(record),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
