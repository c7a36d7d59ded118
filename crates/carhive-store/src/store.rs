//! The catalog state container.
//!
//! `CatalogStore` owns the gateway client and is the only writer of
//! [`CatalogState`]; the view layer reads snapshots through a `watch`
//! subscription and never mutates state directly. All mutations happen in
//! short `send_modify` sections with no await inside, so in-flight requests
//! interleave without tearing the state.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::sync::watch;

use carhive_catalog::{
    extract_list, extract_record, normalize_record, reconcile, CatalogClient, CatalogError,
    InquiryOutcome, InquiryRequest, MissingEndpointPolicy,
};
use carhive_core::{AppConfig, FilterCriteria, FilterUpdate, Vehicle};

/// Published catalog state, cloned into subscribers on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    /// Canonical list as fetched and normalized.
    pub cars: Vec<Vehicle>,
    /// The list the view layer renders: canonical records that survived
    /// filter reconciliation.
    pub filtered_cars: Vec<Vehicle>,
    pub filters: FilterCriteria,
    /// 1-based page cursor of the most recent completed fetch.
    pub page: u32,
    pub is_loading: bool,
    /// Whether another page is likely available, inferred from the last
    /// fetched page being full.
    pub has_more: bool,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            cars: Vec::new(),
            filtered_cars: Vec::new(),
            filters: FilterCriteria::default(),
            page: 1,
            is_loading: false,
            has_more: true,
        }
    }
}

/// Raw records accumulated across one fresh-load fetch, plus the length of
/// the last page for the has-more inference.
struct FetchedPages {
    records: Vec<Value>,
    last_page_len: usize,
}

/// Normalizes a raw page, dropping records that come through without an
/// identifier: every canonical record must be addressable (detail routes,
/// favorites) and an id-less one is unusable downstream.
fn normalize_page(records: &[Value]) -> Vec<Vehicle> {
    records
        .iter()
        .map(normalize_record)
        .filter(|vehicle| {
            if vehicle.id.is_empty() {
                tracing::debug!("dropping catalog record with no identifier");
                return false;
            }
            true
        })
        .collect()
}

/// State container orchestrating the gateway, normalizer, and reconciler on
/// behalf of the view layer.
pub struct CatalogStore {
    client: CatalogClient,
    page_size: u32,
    brand_scan_page_cap: u32,
    /// Monotonic stamp for fresh loads. A completion whose stamp no longer
    /// matches is stale and must not write into the state.
    generation: AtomicU64,
    state: watch::Sender<CatalogState>,
}

impl CatalogStore {
    #[must_use]
    pub fn new(client: CatalogClient, page_size: u32, brand_scan_page_cap: u32) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            client,
            page_size,
            brand_scan_page_cap,
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Builds the store and its gateway client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let policy = if config.inquiry_404_is_success {
            MissingEndpointPolicy::TreatAsAccepted
        } else {
            MissingEndpointPolicy::Reject
        };
        let client = CatalogClient::with_base_url(
            config.request_timeout_secs,
            &config.user_agent,
            policy,
            &config.api_base_url,
        )?;
        Ok(Self::new(client, config.page_size, config.brand_scan_page_cap))
    }

    /// Subscribes to state changes. The receiver sees every published
    /// snapshot; `borrow()` always yields the latest.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// A snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// A fresh load: discards prior results, resets pagination to page one,
    /// adopts `filters`, and fetches.
    ///
    /// The displayed list is cleared and the loading flag raised *before*
    /// the first await, so a newer fresh load invalidates an older one
    /// up front; the generation stamp then keeps a stale response from
    /// writing back ("only the latest user-intended load wins").
    ///
    /// With a brand criterion set, subsequent pages of the same query are
    /// pre-fetched (up to page [`Self::brand_scan_page_cap`], stopping early
    /// on a short page) to compensate for server-side brand filtering that
    /// cannot be trusted under client-side pagination.
    ///
    /// On gateway failure the state degrades to an empty displayed list with
    /// loading cleared, and the error is returned so callers may surface it.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogError`] from the gateway; the store itself has
    /// already degraded to the fail-soft empty state by then.
    pub async fn load_cars(
        &self,
        filters: FilterCriteria,
        page: u32,
    ) -> Result<(), CatalogError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.state.send_modify(|state| {
            state.filtered_cars.clear();
            state.page = 1;
            state.has_more = true;
            state.is_loading = true;
            state.filters = filters.clone();
        });

        let outcome = self.fetch_pages(&filters, page).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding stale fresh-load response");
            return Ok(());
        }

        match outcome {
            Ok(fetched) => {
                let vehicles = reconcile(normalize_page(&fetched.records), &filters);
                let has_more = fetched.last_page_len >= self.page_size as usize;
                tracing::info!(
                    fetched = fetched.records.len(),
                    displayed = vehicles.len(),
                    has_more,
                    "fresh catalog load complete"
                );
                self.state.send_modify(|state| {
                    state.cars = vehicles.clone();
                    state.filtered_cars = vehicles;
                    state.page = page;
                    state.has_more = has_more;
                    state.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog list fetch failed, presenting empty catalog");
                self.state.send_modify(|state| {
                    state.filtered_cars.clear();
                    state.is_loading = false;
                });
                Err(e)
            }
        }
    }

    /// Fetches the next page for the current filters and appends it.
    ///
    /// A no-op while a load is in flight or when the last page was short.
    /// The fetched page is normalized, reconciled, and **appended** to both
    /// lists; the page cursor advances by one and has-more is recomputed
    /// from the raw page size. A fresh load issued mid-flight supersedes
    /// this call; its late result is discarded.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogError`] from the gateway; the lists are left
    /// untouched and only the loading flag is cleared.
    pub async fn load_more_cars(&self) -> Result<(), CatalogError> {
        let (filters, next_page, generation) = {
            let state = self.state.borrow();
            if state.is_loading || !state.has_more {
                return Ok(());
            }
            (
                state.filters.clone(),
                state.page + 1,
                self.generation.load(Ordering::SeqCst),
            )
        };

        self.state.send_modify(|state| state.is_loading = true);

        let result = self
            .client
            .list_vehicles(&filters, next_page, self.page_size)
            .await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(page = next_page, "discarding stale load-more response");
            return Ok(());
        }

        match result {
            Ok(payload) => {
                let raw = extract_list(&payload);
                let fetched_len = raw.len();
                let vehicles = reconcile(normalize_page(&raw), &filters);
                let has_more = fetched_len >= self.page_size as usize;
                tracing::info!(
                    page = next_page,
                    fetched = fetched_len,
                    appended = vehicles.len(),
                    has_more,
                    "loaded another catalog page"
                );
                self.state.send_modify(|state| {
                    state.cars.extend(vehicles.iter().cloned());
                    state.filtered_cars.extend(vehicles);
                    state.page = next_page;
                    state.has_more = has_more;
                    state.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, page = next_page, "load-more fetch failed");
                self.state.send_modify(|state| state.is_loading = false);
                Err(e)
            }
        }
    }

    /// Merges a partial update into the current criteria. Does not fetch.
    pub fn set_filters(&self, update: FilterUpdate) {
        self.state.send_modify(|state| state.filters.apply(update));
    }

    /// Restores the all-empty default criteria. Does not fetch; callers are
    /// expected to follow up with a fresh [`CatalogStore::load_cars`].
    pub fn reset_filters(&self) {
        self.state
            .send_modify(|state| state.filters = FilterCriteria::default());
    }

    /// Fetches and normalizes a single record.
    ///
    /// Any failure (transport, status, shape mismatch) resolves to `None`
    /// so a detail view can render its "not found" state.
    pub async fn get_vehicle(&self, id: &str) -> Option<Vehicle> {
        match self.client.get_vehicle(id).await {
            Ok(payload) => match extract_record(&payload) {
                Some(raw) => Some(normalize_record(&raw)),
                None => {
                    tracing::warn!(id, "vehicle detail payload matched no known shape");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(id, error = %e, "vehicle detail fetch failed");
                None
            }
        }
    }

    /// Submits a booking inquiry through the gateway.
    ///
    /// # Errors
    ///
    /// Propagates [`CatalogError`] for any failure the configured
    /// missing-endpoint policy does not absorb.
    pub async fn submit_inquiry(
        &self,
        request: &InquiryRequest,
    ) -> Result<InquiryOutcome, CatalogError> {
        self.client.submit_inquiry(request).await
    }

    /// Fetches the first page, plus a bounded scan of subsequent pages for
    /// brand-filtered queries, stopping once a page comes back short.
    async fn fetch_pages(
        &self,
        filters: &FilterCriteria,
        first_page: u32,
    ) -> Result<FetchedPages, CatalogError> {
        let payload = self
            .client
            .list_vehicles(filters, first_page, self.page_size)
            .await?;
        let mut records = extract_list(&payload);
        let mut last_page_len = records.len();

        if filters.brand_constraint().is_some() {
            let mut next = first_page + 1;
            while last_page_len >= self.page_size as usize && next <= self.brand_scan_page_cap {
                tracing::info!(page = next, "scanning further pages for brand filter");
                let payload = self
                    .client
                    .list_vehicles(filters, next, self.page_size)
                    .await?;
                let mut page_records = extract_list(&payload);
                last_page_len = page_records.len();
                records.append(&mut page_records);
                next += 1;
            }
        }

        Ok(FetchedPages {
            records,
            last_page_len,
        })
    }
}
