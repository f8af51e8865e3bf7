//! Booking dashboard data core.
//!
//! Fetches bookings, metrics and revenue trends from the booking API and keeps
//! a filter-dependent view state consistent with them. Each filter change
//! starts a *cycle* that queries the three endpoints concurrently and commits
//! all of their data at once, or none of it. When cycles overlap, the one
//! started last is the only one allowed to commit.
//!
//! # Quick start
//!
//! ```no_run
//! use booking_dashboard::{Dashboard, FilterState, WindowDays};
//!
//! # async fn run() -> booking_dashboard::Result<()> {
//! let dashboard = Dashboard::builder().build()?;
//!
//! // Initial load with default filters (7 days, all statuses, oldest first)
//! dashboard.refresh().await?;
//!
//! // Switch to the 30 day window
//! let filters = dashboard.filters().with_window(WindowDays::Thirty);
//! dashboard.apply_filters(filters).await?;
//!
//! for card in dashboard.stat_cards() {
//!     println!("{}: {}", card.title, card.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod config;
pub mod error;
pub mod models;
pub mod request;
pub mod store;
pub mod sync;
pub mod views;

pub use api::{BookingApi, HttpApi};
#[cfg(feature = "blocking")]
pub use blocking::BlockingDashboard;
pub use config::SyncConfig;
pub use error::{DashboardError, FailureKind, Result};
pub use models::{
    BookingRecord, FilterState, MetricsSummary, SortOrder, StatusFilter, TrendPoint, ViewState,
    WindowDays,
};
pub use request::{ApiEndpoint, CycleTargets, RequestBuilder, RequestTarget};
pub use store::Store;
pub use sync::{SyncOutcome, Synchronizer};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Dashboard`].
///
/// Use [`Dashboard::builder()`] to obtain one, chain configuration methods,
/// and call [`build()`](DashboardBuilder::build).
#[derive(Default)]
pub struct DashboardBuilder {
    config: Option<SyncConfig>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_base_delay: Option<Duration>,
    filters: FilterState,
    api: Option<Arc<dyn BookingApi>>,
}

impl DashboardBuilder {
    /// Start from a complete configuration instead of the defaults.
    ///
    /// Individual setters called on the builder still take precedence.
    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the API base URL, e.g. `http://localhost:8080`.
    ///
    /// Defaults to [`config::DEFAULT_API_BASE`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-request timeout. Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set how many times a request is retried after a network error.
    ///
    /// Defaults to 2. Status and payload errors are never retried.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the first retry delay; later attempts double it.
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = Some(delay);
        self
    }

    /// Initial filters. Defaults to the last 7 days, all statuses, oldest first.
    pub fn filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    /// Use a custom data source instead of the HTTP API.
    ///
    /// Connection settings are ignored when a source is supplied.
    pub fn api(mut self, api: Arc<dyn BookingApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Build the dashboard.
    ///
    /// Validates the base URL and creates the HTTP client but issues no
    /// requests; call [`Dashboard::refresh`] or [`Dashboard::watch_filters`]
    /// for the first load.
    pub fn build(self) -> Result<Dashboard> {
        let api = match self.api {
            Some(api) => api,
            None => {
                let mut config = self.config.unwrap_or_default();
                if let Some(base) = self.base_url {
                    config.base_url = config::parse_base_url(&base)?;
                }
                if let Some(timeout) = self.timeout {
                    config.timeout = timeout;
                }
                if let Some(retries) = self.max_retries {
                    config.max_retries = retries;
                }
                if let Some(delay) = self.retry_base_delay {
                    config.retry_base_delay = delay;
                }
                tracing::debug!(
                    base_url = %config.base_url,
                    timeout_ms = config.timeout.as_millis() as u64,
                    max_retries = config.max_retries,
                    "building booking API client"
                );
                Arc::new(HttpApi::new(&config)?) as Arc<dyn BookingApi>
            }
        };
        Ok(Dashboard {
            sync: Arc::new(Synchronizer::new(api, self.filters)),
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// The entry point: one synchronizer shared by every page of the dashboard.
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Clone)]
pub struct Dashboard {
    sync: Arc<Synchronizer>,
}

impl Dashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// Return the underlying [`Synchronizer`] for advanced usage.
    pub fn synchronizer(&self) -> &Arc<Synchronizer> {
        &self.sync
    }

    // -- Cycles --------------------------------------------------------------

    /// Run a cycle for explicit filters. See [`Synchronizer::sync`].
    pub async fn sync(&self, filters: FilterState) -> Result<SyncOutcome> {
        self.sync.sync(filters).await
    }

    /// Replace the filters and run a cycle for them.
    pub async fn apply_filters(&self, filters: FilterState) -> Result<SyncOutcome> {
        self.sync.apply_filters(filters).await
    }

    /// Re-run a cycle with the current filters (the "Refresh" button).
    pub async fn refresh(&self) -> Result<SyncOutcome> {
        self.sync.refresh().await
    }

    /// Re-fetch automatically whenever the filters change.
    pub fn watch_filters(&self) -> JoinHandle<()> {
        Synchronizer::watch_filters(&self.sync)
    }

    // -- State -----------------------------------------------------------

    pub fn filters(&self) -> FilterState {
        self.sync.filters()
    }

    pub fn set_filters(&self, filters: FilterState) {
        self.sync.set_filters(filters);
    }

    pub fn update_filters(&self, f: impl FnOnce(&mut FilterState)) {
        self.sync.update_filters(f);
    }

    pub fn view(&self) -> ViewState {
        self.sync.view()
    }

    /// Receiver notified on every view change, loading flag included.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.sync.subscribe()
    }

    // -- Projections ---------------------------------------------------------

    /// Headline cards, or an empty list while no metrics are committed.
    pub fn stat_cards(&self) -> Vec<views::StatCard> {
        self.sync
            .view_store()
            .read(|v| v.metrics.as_ref().map(views::stat_cards))
            .unwrap_or_default()
    }

    /// Status chart input. No committed metrics reads as no data.
    pub fn status_breakdown(&self) -> views::StatusBreakdown {
        self.sync
            .view_store()
            .read(|v| v.metrics.as_ref().map(views::status_breakdown))
            .unwrap_or(views::StatusBreakdown::NoData)
    }

    pub fn booking_cards(&self) -> Vec<views::BookingCard> {
        self.sync
            .view_store()
            .read(|v| v.bookings.iter().map(views::booking_card).collect())
    }

    pub fn users(&self) -> Vec<views::UserRow> {
        self.sync
            .view_store()
            .read(|v| views::project_users(&v.bookings))
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.sync.view();
        write!(
            f,
            "Dashboard(filters=[{}], cycle={}, bookings={}, loading={})",
            self.sync.filters(),
            view.cycle,
            view.bookings.len(),
            view.is_loading
        )
    }
}
