//! Listing record types

use crate::error::{Error, Result};
use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Identity of a listing: the pair (listing id, host id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListingKey {
    /// Listing id
    pub id: u64,
    /// Host id
    pub host_id: u64,
}

/// One rentable property
///
/// Records are immutable once received. Fields the backend omits stay `None`
/// and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Backend document id
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Listing id
    pub id: u64,

    /// Host id
    pub host_id: u64,

    /// Display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub neighborhood_overview: Option<String>,

    #[serde(default)]
    pub listing_url: Option<String>,

    #[serde(default)]
    pub picture_url: Option<String>,

    #[serde(default)]
    pub host_name: Option<String>,

    #[serde(default)]
    pub host_since: Option<String>,

    #[serde(default)]
    pub host_location: Option<String>,

    #[serde(default)]
    pub host_thumbnail_url: Option<String>,

    #[serde(default)]
    pub neighbourhood_cleansed: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Market segment the listing belongs to
    #[serde(default)]
    pub property_type: Option<String>,

    #[serde(default)]
    pub room_type: Option<String>,

    #[serde(default)]
    pub accommodates: Option<u32>,

    #[serde(default)]
    pub bedrooms: Option<u32>,

    #[serde(default)]
    pub beds: Option<u32>,

    #[serde(default)]
    pub bathrooms: Option<f64>,

    #[serde(default)]
    pub bathrooms_text: Option<String>,

    /// Display price, e.g. `"$1,250.00"`
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub review_scores_rating: Option<f64>,

    #[serde(default)]
    pub number_of_reviews: u32,
}

impl ListingRecord {
    /// Create a minimal record, mostly useful for fixtures
    pub fn new(id: u64, host_id: u64, name: impl Into<String>) -> Self {
        Self {
            document_id: None,
            id,
            host_id,
            name: name.into(),
            description: None,
            neighborhood_overview: None,
            listing_url: None,
            picture_url: None,
            host_name: None,
            host_since: None,
            host_location: None,
            host_thumbnail_url: None,
            neighbourhood_cleansed: None,
            latitude: None,
            longitude: None,
            property_type: None,
            room_type: None,
            accommodates: None,
            bedrooms: None,
            beds: None,
            bathrooms: None,
            bathrooms_text: None,
            price: None,
            review_scores_rating: None,
            number_of_reviews: 0,
        }
    }

    /// Set the property type
    #[must_use]
    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    /// Set the display price
    #[must_use]
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Identity key
    pub fn key(&self) -> ListingKey {
        ListingKey {
            id: self.id,
            host_id: self.host_id,
        }
    }

    /// Parse the display price into a number
    ///
    /// Currency symbols and thousands separators are stripped.
    pub fn price_amount(&self) -> Option<f64> {
        let raw = self.price.as_deref()?;
        let digits: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }

    /// Check whether this listing belongs to a category
    pub fn in_category(&self, category: &Category) -> bool {
        category.matches(self.property_type.as_deref())
    }
}

/// Request for one page of listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Category filter
    pub category: Category,
    /// 1-based page number
    pub page: u32,
    /// Records per page
    pub page_size: u32,
}

impl PageQuery {
    /// Create a new page query
    pub fn new(category: impl Into<Category>, page: u32, page_size: u32) -> Self {
        Self {
            category: category.into(),
            page,
            page_size,
        }
    }

    /// Reject page 0 and empty pages
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(Error::invalid_query("page numbers start at 1"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_query("page size must be greater than 0"));
        }
        Ok(())
    }

    /// Query parameters for `/get_farmhouses`
    pub fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("category".to_string(), self.category.as_str().to_string());
        params.insert("page".to_string(), self.page.to_string());
        params.insert("limit".to_string(), self.page_size.to_string());
        params
    }

    /// Index of the first record of this page in the full result set
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.page_size as usize
    }
}

/// Decoded response of one page fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Records in server order
    #[serde(rename = "farmhouses")]
    pub records: Vec<ListingRecord>,
}

impl ListingPage {
    /// Create a page from records
    pub fn new(records: Vec<ListingRecord>) -> Self {
        Self { records }
    }

    /// Number of records in the page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A page shorter than requested is the last one
    pub fn is_last(&self, page_size: u32) -> bool {
        self.records.len() < page_size as usize
    }
}
