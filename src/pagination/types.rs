//! Pagination types
//!
//! Paging state for one activated category, loader configuration, and the
//! outcome reported by each load attempt.

use crate::listing::{ListingPage, ListingRecord, PageQuery, DEFAULT_PAGE_SIZE};
use crate::types::Category;
use serde::{Deserialize, Serialize};

/// What a failed page fetch does to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Report `LoadOutcome::Failed`; the next trigger retries the same page
    #[default]
    RetryOnNextTrigger,
    /// Return the underlying error from `load_next`
    Surface,
}

/// Configuration for the paginated loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Records requested per page
    pub page_size: u32,
    /// Failure reporting policy
    pub error_policy: ErrorPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl LoaderConfig {
    /// Create a config with the given page size
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }

    /// Set the error policy
    #[must_use]
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}

/// Per-category paging state
///
/// Items are append-only in server order. A new category always gets a
/// fresh state with a new generation.
#[derive(Debug, Clone)]
pub struct PagingState {
    /// Identity of this state
    pub generation: u64,
    /// Category the pages belong to
    pub category: Category,
    /// Accumulated records
    pub items: Vec<ListingRecord>,
    /// Last successfully applied page, 0 when none
    pub last_page: u32,
    /// No further pages exist
    pub exhausted: bool,
    /// A fetch is outstanding
    pub in_flight: bool,
    /// Display string of the last failed attempt
    pub last_error: Option<String>,
}

impl PagingState {
    /// Create an empty state for a category
    pub fn new(category: Category, generation: u64) -> Self {
        Self {
            generation,
            category,
            items: Vec::new(),
            last_page: 0,
            exhausted: false,
            in_flight: false,
            last_error: None,
        }
    }

    /// Query for the page after the last applied one
    pub fn next_query(&self, page_size: u32) -> PageQuery {
        PageQuery::new(self.category.clone(), self.last_page + 1, page_size)
    }

    /// Append a fetched page and advance; returns whether the state is now exhausted
    pub fn apply_page(&mut self, page: ListingPage, page_size: u32) -> bool {
        self.exhausted = page.is_last(page_size);
        self.items.extend(page.records);
        self.last_page += 1;
        self.last_error = None;
        self.exhausted
    }

    /// Why a fetch may not start now, if it may not
    pub fn blocked_by(&self) -> Option<SkipReason> {
        if self.in_flight {
            Some(SkipReason::InFlight)
        } else if self.exhausted {
            Some(SkipReason::Exhausted)
        } else {
            None
        }
    }
}

/// Why a `load_next` call did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A fetch is already outstanding
    InFlight,
    /// The last page has been seen
    Exhausted,
    /// No category has been activated
    Inactive,
}

/// Result of one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was appended
    Loaded {
        /// Page number that was applied
        page: u32,
        /// Records appended
        count: usize,
        /// The page was short, nothing more to load
        exhausted: bool,
    },
    /// No request was made
    Skipped(SkipReason),
    /// The request failed and nothing was committed
    Failed {
        /// Page number that will be requested again
        page: u32,
    },
    /// The state was replaced while the request was outstanding
    Stale,
}

impl LoadOutcome {
    /// Check if records were appended
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Check if the attempt failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Point-in-time view of the loader for observers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderSnapshot {
    /// Active category, `None` before activation or after teardown
    pub category: Option<Category>,
    /// Records accumulated so far
    pub item_count: usize,
    /// Last applied page
    pub last_page: u32,
    /// No further pages exist
    pub exhausted: bool,
    /// A fetch is outstanding
    pub in_flight: bool,
    /// Last failure, cleared by the next success
    pub last_error: Option<String>,
}

impl From<&PagingState> for LoaderSnapshot {
    fn from(state: &PagingState) -> Self {
        Self {
            category: Some(state.category.clone()),
            item_count: state.items.len(),
            last_page: state.last_page,
            exhausted: state.exhausted,
            in_flight: state.in_flight,
            last_error: state.last_error.clone(),
        }
    }
}
