//! Saved listings
//!
//! A wishlist keeps a denormalised summary of each saved listing so it can be
//! shown without refetching, grouped by the listing's category.

use crate::error::{Error, Result};
use crate::listing::{ListingKey, ListingRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Group used for listings without a property type
pub const UNCATEGORISED: &str = "Others";

/// One saved listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// Identity of the saved listing
    pub key: ListingKey,
    /// Listing name at the time it was saved
    pub title: String,
    /// Cover picture
    #[serde(default)]
    pub picture_url: Option<String>,
    /// Nightly price as a number
    #[serde(default)]
    pub price: Option<f64>,
    /// Review score
    #[serde(default)]
    pub rating: Option<f64>,
    /// Property type, or [`UNCATEGORISED`]
    pub category: String,
    /// When the listing was saved
    pub added_at: DateTime<Utc>,
}

impl WishlistEntry {
    /// Summarise a listing record
    pub fn from_record(record: &ListingRecord) -> Self {
        Self {
            key: record.key(),
            title: record.name.clone(),
            picture_url: record.picture_url.clone(),
            price: record.price_amount(),
            rating: record.review_scores_rating,
            category: record
                .property_type
                .clone()
                .unwrap_or_else(|| UNCATEGORISED.to_string()),
            added_at: Utc::now(),
        }
    }
}

/// Saved listings in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(default)]
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    /// Create an empty wishlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a wishlist from a JSON file; a missing file is an empty wishlist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(Error::from)
    }

    /// Write the wishlist as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Save a listing; returns false if it was already saved
    pub fn add(&mut self, record: &ListingRecord) -> bool {
        if self.contains(record.key()) {
            return false;
        }
        self.entries.push(WishlistEntry::from_record(record));
        true
    }

    /// Remove a saved listing; returns the removed entry
    pub fn remove(&mut self, key: ListingKey) -> Option<WishlistEntry> {
        let index = self.entries.iter().position(|entry| entry.key == key)?;
        Some(self.entries.remove(index))
    }

    /// Remove every entry for a listing id regardless of host
    pub fn remove_id(&mut self, id: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.key.id != id);
        before - self.entries.len()
    }

    /// Flip the saved state of a listing; returns true if it is now saved
    pub fn toggle(&mut self, record: &ListingRecord) -> bool {
        if self.remove(record.key()).is_some() {
            false
        } else {
            self.add(record)
        }
    }

    /// Check if a listing is saved
    pub fn contains(&self, key: ListingKey) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    /// Number of saved listings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is saved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Saved listings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &WishlistEntry> {
        self.entries.iter()
    }

    /// Entries grouped by category, each group in insertion order
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&WishlistEntry>> {
        let mut groups: BTreeMap<&str, Vec<&WishlistEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.category.as_str()).or_default().push(entry);
        }
        groups
    }
}
