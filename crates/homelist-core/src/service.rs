// ── Listing service ──
//
// Single owner of listing state. Every mutation of the favorites set,
// the active filter, or the current page happens under one mutex, and
// published cells are updated inside that critical section.

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use homelist_api::{HomePatch, HomePayload, HomesClient, TransportConfig};
use tracing::{debug, info, warn};

use crate::config::{FetchOrdering, ListingConfig};
use crate::error::CoreError;
use crate::favorites::FavoritesStore;
use crate::form::HomeForm;
use crate::model::{Home, HomeFilter, HomeId};
use crate::store::ListingState;
use crate::stream::StateStream;

/// Listing state owner: pages, filter, and favorites.
///
/// Cheaply cloneable via `Arc<ServiceInner>`; every clone shares the
/// same state.
#[derive(Clone)]
pub struct ListingService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    config: ListingConfig,
    api: HomesClient,
    store: Arc<dyn FavoritesStore>,
    state: ListingState,
    /// The favorites set, in insertion order. Its lock guards every state
    /// mutation, not just this vector.
    favorites: Mutex<Vec<Home>>,
    fetch_seq: AtomicU64,
}

/// Resets `is_loading` when a fetch finishes or its future is dropped.
struct LoadingGuard<'a> {
    inner: &'a ServiceInner,
    seq: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let latest = self.inner.fetch_seq.load(Ordering::SeqCst);
        match self.inner.config.fetch_ordering {
            FetchOrdering::LastResolved => self.inner.state.is_loading.set(false),
            FetchOrdering::LatestIssued if self.seq == latest => {
                self.inner.state.is_loading.set(false);
            }
            FetchOrdering::LatestIssued => {}
        }
    }
}

impl ListingService {
    /// Build a service with its own HTTP client.
    pub fn new(config: ListingConfig, store: Arc<dyn FavoritesStore>) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let api = HomesClient::new(config.api_url.clone(), &transport)?;
        Ok(Self::with_client(api, store, config))
    }

    /// Build a service around an existing client. Loads favorites once.
    pub fn with_client(
        api: HomesClient,
        store: Arc<dyn FavoritesStore>,
        config: ListingConfig,
    ) -> Self {
        let mut seen = HashSet::new();
        let favorites: Vec<Home> = store
            .load()
            .into_iter()
            .filter(|h| seen.insert(h.id.clone()))
            .map(|h| h.with_favorite(true))
            .collect();
        info!(count = favorites.len(), "favorites loaded");

        let state = ListingState::default();
        state.favorites_homes.set(Arc::new(favorites.clone()));

        Self {
            inner: Arc::new(ServiceInner {
                config,
                api,
                store,
                state,
                favorites: Mutex::new(favorites),
                fetch_seq: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &ListingConfig {
        &self.inner.config
    }

    pub fn api(&self) -> &HomesClient {
        &self.inner.api
    }

    fn lock_favorites(&self) -> MutexGuard<'_, Vec<Home>> {
        self.inner
            .favorites
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ── Filter ───────────────────────────────────────────────────────

    /// Replace the active filter and recompute the favorites view.
    /// Does not fetch.
    pub fn set_filter(&self, filter: HomeFilter) {
        let favorites = self.lock_favorites();
        self.inner
            .state
            .favorites_homes
            .set_if_changed(Arc::new(filter.apply(&favorites)));
        if self.inner.state.active_filter.set_if_changed(filter) {
            debug!(filter = %self.inner.state.active_filter.get().describe(), "filter changed");
        }
    }

    /// Set the filter and reload from the first page.
    pub async fn apply_filter(&self, filter: HomeFilter) -> Result<(), CoreError> {
        self.set_filter(filter);
        self.fetch_homes(1, self.inner.config.page_size).await
    }

    /// Drop every constraint and reload from the first page.
    pub async fn clear_filter(&self) -> Result<(), CoreError> {
        self.apply_filter(HomeFilter::default()).await
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Fetch one page under the active filter with the configured page size.
    pub async fn fetch_page(&self, page: u32) -> Result<(), CoreError> {
        self.fetch_homes(page, self.inner.config.page_size).await
    }

    /// Fetch one page under the active filter.
    ///
    /// On success the page and totals are replaced; on failure the `error`
    /// cell is set and the previous page kept. `page` and `limit` below 1
    /// are raised to 1.
    pub async fn fetch_homes(&self, page: u32, limit: u32) -> Result<(), CoreError> {
        let page = page.max(1);
        let limit = limit.max(1);
        let seq = self.inner.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let query = {
            let _lock = self.lock_favorites();
            self.inner.state.is_loading.set(true);
            self.inner.state.error.set(None);
            self.inner.state.active_filter.get().to_query(page, limit)
        };
        let _loading = LoadingGuard {
            inner: &self.inner,
            seq,
        };

        let result = self.inner.api.list_homes(&query).await;

        let favorites = self.lock_favorites();
        if self.inner.config.fetch_ordering == FetchOrdering::LatestIssued
            && seq != self.inner.fetch_seq.load(Ordering::SeqCst)
        {
            debug!(page, seq, "discarding stale page response");
            return Ok(());
        }

        match result {
            Ok(paginated) => {
                let ids: HashSet<&HomeId> = favorites.iter().map(|h| &h.id).collect();
                let homes: Vec<Home> = paginated
                    .data
                    .into_iter()
                    .map(Home::from)
                    .map(|mut h| {
                        h.is_favorite = ids.contains(&h.id);
                        h
                    })
                    .collect();
                debug!(
                    page,
                    count = homes.len(),
                    pages = paginated.pages,
                    items = paginated.items,
                    "page loaded"
                );
                self.inner.state.paginated_homes.set(Arc::new(homes));
                self.inner.state.total_pages.set(paginated.pages);
                self.inner.state.total_items.set(paginated.items);
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(page, error = %err, "failed to fetch homes");
                self.inner.state.error.set(Some(err.to_string()));
                Err(err)
            }
        }
    }

    // ── Single listings ──────────────────────────────────────────────

    /// Validate and create a listing. Nothing is sent if validation fails.
    pub async fn create_home(&self, form: &HomeForm) -> Result<Home, CoreError> {
        let draft = form
            .validate()
            .map_err(|errors| CoreError::Validation { errors })?;
        let record = self
            .inner
            .api
            .create_home(&HomePayload::from(&draft))
            .await?;
        info!(id = %record.id, "home created");
        Ok(self.flagged(Home::from(record)))
    }

    /// Validate and update a listing. Nothing is sent if validation fails.
    pub async fn update_home(&self, id: &HomeId, form: &HomeForm) -> Result<Home, CoreError> {
        let draft = form
            .validate()
            .map_err(|errors| CoreError::Validation { errors })?;
        let record = self
            .inner
            .api
            .update_home(id.as_record(), &HomePatch::from(&draft))
            .await?;
        info!(%id, "home updated");
        Ok(self.flagged(Home::from(record)))
    }

    pub async fn get_home_by_id(&self, id: &HomeId) -> Result<Home, CoreError> {
        let record = self.inner.api.get_home(id.as_record()).await?;
        Ok(self.flagged(Home::from(record)))
    }

    fn flagged(&self, home: Home) -> Home {
        let is_favorite = self.is_favorite(&home.id);
        home.with_favorite(is_favorite)
    }

    // ── Favorites ────────────────────────────────────────────────────

    /// Add `home` to the favorites set, or remove it if already there.
    ///
    /// Returns the new favorite state. The in-memory change stands even
    /// when persisting fails; the failure is returned.
    pub fn toggle_favorite(&self, home: &Home) -> Result<bool, CoreError> {
        let mut favorites = self.lock_favorites();

        let now_favorite = if let Some(pos) = favorites.iter().position(|f| f.id == home.id) {
            favorites.remove(pos);
            false
        } else {
            favorites.push(home.with_favorite(true));
            true
        };

        let page = self.inner.state.paginated_homes.get();
        if page.iter().any(|h| h.id == home.id) {
            let updated = page
                .iter()
                .map(|h| {
                    if h.id == home.id {
                        h.with_favorite(now_favorite)
                    } else {
                        h.clone()
                    }
                })
                .collect();
            self.inner.state.paginated_homes.set(Arc::new(updated));
        }

        let filter = self.inner.state.active_filter.get();
        self.inner
            .state
            .favorites_homes
            .set(Arc::new(filter.apply(&favorites)));

        info!(id = %home.id, favorite = now_favorite, "favorite toggled");

        if let Err(e) = self.inner.store.save(&favorites) {
            warn!(error = %e, "favorites not persisted");
            return Err(e);
        }
        Ok(now_favorite)
    }

    /// The full favorites set, unfiltered, in insertion order.
    pub fn favorites(&self) -> Vec<Home> {
        self.lock_favorites().clone()
    }

    pub fn is_favorite(&self, id: &HomeId) -> bool {
        self.lock_favorites().iter().any(|h| &h.id == id)
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn paginated_homes(&self) -> Arc<Vec<Home>> {
        self.inner.state.paginated_homes.get()
    }

    pub fn total_pages(&self) -> u32 {
        self.inner.state.total_pages.get()
    }

    pub fn total_items(&self) -> u32 {
        self.inner.state.total_items.get()
    }

    /// Page numbers available for navigation.
    pub fn pages(&self) -> RangeInclusive<u32> {
        1..=self.total_pages()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.is_loading.get()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.error.get()
    }

    /// Favorites narrowed by the active filter.
    pub fn favorites_homes(&self) -> Arc<Vec<Home>> {
        self.inner.state.favorites_homes.get()
    }

    pub fn active_filter(&self) -> HomeFilter {
        self.inner.state.active_filter.get()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_paginated_homes(&self) -> StateStream<Arc<Vec<Home>>> {
        self.inner.state.paginated_homes.subscribe()
    }

    pub fn subscribe_total_pages(&self) -> StateStream<u32> {
        self.inner.state.total_pages.subscribe()
    }

    pub fn subscribe_total_items(&self) -> StateStream<u32> {
        self.inner.state.total_items.subscribe()
    }

    pub fn subscribe_is_loading(&self) -> StateStream<bool> {
        self.inner.state.is_loading.subscribe()
    }

    pub fn subscribe_error(&self) -> StateStream<Option<String>> {
        self.inner.state.error.subscribe()
    }

    pub fn subscribe_favorites_homes(&self) -> StateStream<Arc<Vec<Home>>> {
        self.inner.state.favorites_homes.subscribe()
    }

    pub fn subscribe_active_filter(&self) -> StateStream<HomeFilter> {
        self.inner.state.active_filter.subscribe()
    }
}
