// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unused_async)]

//! # Ajar Listings
//!
//! Paginated, category-filtered access to the Ajar rental listings backend.
//!
//! ## Features
//!
//! - **Infinite-scroll pagination**: one page at a time, append-only, with
//!   category resets that discard stale responses
//! - **Pluggable data sources**: HTTP backend or a local JSON fixture
//! - **Resilient HTTP**: retries with backoff and client-side rate limiting
//! - **Wishlist**: saved listings grouped by category, persisted as JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ajar_listings::{build_provider, AppConfig, LoaderConfig, PaginatedListLoader, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load("ajar.yaml")?;
//!     let provider = build_provider(&config.provider)?;
//!     let loader = PaginatedListLoader::new(provider, config.loader);
//!
//!     // First page of a category
//!     loader.reset("FarmHouses").await?;
//!
//!     // Scrolled near the end
//!     loader.load_next().await?;
//!
//!     for listing in loader.current_items() {
//!         println!("{} {}", listing.name, listing.price.as_deref().unwrap_or("-"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   PaginatedListLoader                    │
//! │     reset(category)   load_next()   current_items()      │
//! └─────────────────────────────┬────────────────────────────┘
//!                               │ Arc<dyn ListingProvider>
//!              ┌────────────────┴────────────────┐
//! ┌────────────┴────────────┐      ┌─────────────┴────────────┐
//! │   HttpListingProvider   │      │  FixtureListingProvider  │
//! │   retry · rate limit    │      │   JSON file in memory    │
//! └─────────────────────────┘      └──────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Listing records and page queries
pub mod listing;

/// HTTP client with retry and rate limiting
pub mod http;

/// Listing data sources
pub mod provider;

/// Paginated list loading
pub mod pagination;

/// Application configuration
pub mod config;

/// Saved listings
pub mod wishlist;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::{AppConfig, HttpProviderConfig, ProviderConfig};
pub use listing::{ListingKey, ListingPage, ListingRecord, PageQuery, DEFAULT_PAGE_SIZE};
pub use pagination::{
    ErrorPolicy, LoadOutcome, LoaderConfig, LoaderSnapshot, PaginatedListLoader, SkipReason,
};
pub use provider::{build_provider, FixtureListingProvider, HttpListingProvider, ListingProvider};
pub use wishlist::{Wishlist, WishlistEntry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
