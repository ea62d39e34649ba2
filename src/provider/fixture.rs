//! In-memory listing provider backed by a JSON fixture
//!
//! The fixture is a JSON array of listing records in display order, the same
//! shape the backend stores. Pages are sliced out of the category-filtered
//! view, so a fixture behaves exactly like a backend that never fails.

use super::ListingProvider;
use crate::error::{Error, Result, ResultExt};
use crate::listing::{ListingPage, ListingRecord, PageQuery};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Listing provider serving records from memory
#[derive(Debug, Clone, Default)]
pub struct FixtureListingProvider {
    records: Vec<ListingRecord>,
}

impl FixtureListingProvider {
    /// Create a provider from records
    pub fn new(records: Vec<ListingRecord>) -> Self {
        Self { records }
    }

    /// Load a provider from a JSON array file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents).with_context(|| format!("fixture {}", path.display()))
    }

    /// Parse a provider from a JSON array string
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<ListingRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Number of records in the fixture
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the fixture holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ListingProvider for FixtureListingProvider {
    async fn fetch_page(&self, query: &PageQuery) -> Result<ListingPage> {
        query.validate()?;

        let records: Vec<ListingRecord> = self
            .records
            .iter()
            .filter(|record| record.in_category(&query.category))
            .skip(query.offset())
            .take(query.page_size as usize)
            .cloned()
            .collect();

        debug!(
            "fixture page category={} page={} -> {} records",
            query.category,
            query.page,
            records.len()
        );
        Ok(ListingPage::new(records))
    }

    async fn fetch_listing(&self, id: u64) -> Result<Option<ListingRecord>> {
        Ok(self.records.iter().find(|record| record.id == id).cloned())
    }

    fn name(&self) -> &str {
        "fixture"
    }
}
