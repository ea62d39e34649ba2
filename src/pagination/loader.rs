//! Paginated listing loader
//!
//! Owns the paging state of the active category and appends pages fetched
//! through a [`ListingProvider`] as the presentation layer asks for more.
//!
//! The state lives behind a `std::sync::Mutex` that is never held across an
//! `.await`. `in_flight` is set under the lock before the provider is called
//! and cleared under the lock once the outcome has been applied, so a trigger
//! arriving mid-fetch is a no-op. Each state carries a generation; a fetch
//! whose generation no longer matches the current state is discarded.

use super::types::{
    ErrorPolicy, LoadOutcome, LoaderConfig, LoaderSnapshot, PagingState, SkipReason,
};
use crate::error::Result;
use crate::listing::ListingRecord;
use crate::provider::ListingProvider;
use crate::types::Category;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    state: Option<PagingState>,
}

/// Accumulates category-scoped listing pages for a list view
pub struct PaginatedListLoader {
    provider: Arc<dyn ListingProvider>,
    config: LoaderConfig,
    slot: Mutex<Slot>,
}

impl PaginatedListLoader {
    /// Create a loader with no active category
    pub fn new(provider: Arc<dyn ListingProvider>, config: LoaderConfig) -> Self {
        Self {
            provider,
            config,
            slot: Mutex::new(Slot::default()),
        }
    }

    /// Loader configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Discard the current state, activate `category` and load its first page
    ///
    /// The state is replaced before anything is awaited, so observers see an
    /// empty list at page 0 even while the first fetch is outstanding.
    pub async fn reset(&self, category: impl Into<Category>) -> Result<LoadOutcome> {
        self.activate(category.into());
        self.load_next().await
    }

    /// Like [`reset`](Self::reset), but the first page is fetched on a spawned task
    pub fn reset_in_background(
        self: &Arc<Self>,
        category: impl Into<Category>,
    ) -> JoinHandle<Result<LoadOutcome>> {
        self.activate(category.into());
        self.load_next_in_background()
    }

    /// Spawn [`load_next`](Self::load_next) on the tokio runtime
    pub fn load_next_in_background(self: &Arc<Self>) -> JoinHandle<Result<LoadOutcome>> {
        let loader = Arc::clone(self);
        tokio::spawn(async move { loader.load_next().await })
    }

    /// Fetch and append the next page of the active category
    ///
    /// Does nothing while a fetch is outstanding, after the last page, or
    /// before a category is active. A failed fetch commits nothing; what the
    /// caller sees depends on [`ErrorPolicy`].
    pub async fn load_next(&self) -> Result<LoadOutcome> {
        let (generation, query) = {
            let mut slot = self.lock();
            let Some(state) = slot.state.as_mut() else {
                debug!("load_next skipped: no active category");
                return Ok(LoadOutcome::Skipped(SkipReason::Inactive));
            };
            if let Some(reason) = state.blocked_by() {
                debug!("load_next skipped for {}: {:?}", state.category, reason);
                return Ok(LoadOutcome::Skipped(reason));
            }
            state.in_flight = true;
            (state.generation, state.next_query(self.config.page_size))
        };

        debug!(
            "Fetching page {} of {} via {}",
            query.page,
            query.category,
            self.provider.name()
        );

        let mut guard = InFlightGuard {
            loader: self,
            generation,
            armed: true,
        };
        let result = self.provider.fetch_page(&query).await;
        guard.armed = false;

        let mut slot = self.lock();
        let Some(state) = slot
            .state
            .as_mut()
            .filter(|state| state.generation == generation)
        else {
            debug!(
                "Discarding stale page {} of {}",
                query.page, query.category
            );
            return Ok(LoadOutcome::Stale);
        };
        state.in_flight = false;

        match result {
            Ok(page) => {
                let count = page.len();
                let exhausted = state.apply_page(page, self.config.page_size);
                debug!(
                    "Applied page {} of {}: {} records, {} total{}",
                    query.page,
                    query.category,
                    count,
                    state.items.len(),
                    if exhausted { ", exhausted" } else { "" }
                );
                Ok(LoadOutcome::Loaded {
                    page: query.page,
                    count,
                    exhausted,
                })
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
                warn!(
                    "Failed to fetch page {} of {}: {}",
                    query.page, query.category, e
                );
                match self.config.error_policy {
                    ErrorPolicy::RetryOnNextTrigger => Ok(LoadOutcome::Failed { page: query.page }),
                    ErrorPolicy::Surface => Err(e),
                }
            }
        }
    }

    /// Copy of the accumulated records in server order
    pub fn current_items(&self) -> Vec<ListingRecord> {
        self.lock()
            .state
            .as_ref()
            .map(|state| state.items.clone())
            .unwrap_or_default()
    }

    /// Check if a fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.lock()
            .state
            .as_ref()
            .is_some_and(|state| state.in_flight)
    }

    /// Active category, if any
    pub fn category(&self) -> Option<Category> {
        self.lock().state.as_ref().map(|state| state.category.clone())
    }

    /// Point-in-time view of the paging state
    pub fn snapshot(&self) -> LoaderSnapshot {
        self.lock()
            .state
            .as_ref()
            .map(LoaderSnapshot::from)
            .unwrap_or_default()
    }

    /// Drop the active state; any outstanding fetch becomes stale
    pub fn clear(&self) {
        let mut slot = self.lock();
        slot.generation += 1;
        if let Some(old) = slot.state.take() {
            debug!("Cleared loader state for {}", old.category);
        }
    }

    fn activate(&self, category: Category) {
        let mut slot = self.lock();
        slot.generation += 1;
        if let Some(old) = &slot.state {
            if old.in_flight {
                debug!("Abandoning in-flight fetch for {}", old.category);
            }
        }
        info!("Activated category {}", category);
        slot.state = Some(PagingState::new(category, slot.generation));
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for PaginatedListLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedListLoader")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

/// Clears `in_flight` if a `load_next` future is dropped mid-fetch
struct InFlightGuard<'a> {
    loader: &'a PaginatedListLoader,
    generation: u64,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut slot = self.loader.lock();
        if let Some(state) = slot
            .state
            .as_mut()
            .filter(|state| state.generation == self.generation)
        {
            debug!("Fetch for {} cancelled", state.category);
            state.in_flight = false;
        }
    }
}
