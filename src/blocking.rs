//! Blocking wrapper around [`Dashboard`] for callers without an async runtime.
//!
//! Owns a single-worker Tokio runtime. `refresh` and `apply_filters` drive
//! their cycle to completion with `block_on`; `watch_filters` runs the filter
//! watcher on the worker in the background.
//!
//! # Example
//!
//! ```no_run
//! use booking_dashboard::{BlockingDashboard, FilterState, StatusFilter};
//!
//! let dashboard = BlockingDashboard::builder().build().unwrap();
//! dashboard.refresh().unwrap();
//!
//! let filters = dashboard.filters().with_status(StatusFilter::Pending);
//! let view = dashboard.apply_filters(filters).unwrap();
//! println!("{} pending bookings", view.bookings.len());
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;

use crate::api::BookingApi;
use crate::config::SyncConfig;
use crate::error::{DashboardError, Result};
use crate::models::{FilterState, ViewState};
use crate::sync::SyncOutcome;
use crate::{Dashboard, DashboardBuilder};

// ---------------------------------------------------------------------------
// BlockingDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`BlockingDashboard`].
#[derive(Default)]
pub struct BlockingDashboardBuilder {
    inner: DashboardBuilder,
}

impl BlockingDashboardBuilder {
    pub fn config(mut self, config: SyncConfig) -> Self {
        self.inner = self.inner.config(config);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.inner = self.inner.max_retries(retries);
        self
    }

    pub fn filters(mut self, filters: FilterState) -> Self {
        self.inner = self.inner.filters(filters);
        self
    }

    pub fn api(mut self, api: Arc<dyn BookingApi>) -> Self {
        self.inner = self.inner.api(api);
        self
    }

    /// Build the runtime and the dashboard.
    pub fn build(self) -> Result<BlockingDashboard> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("booking-dashboard")
            .enable_all()
            .build()
            .map_err(|e| DashboardError::Runtime(e.to_string()))?;
        let dashboard = self.inner.build()?;
        Ok(BlockingDashboard { runtime, dashboard })
    }
}

// ---------------------------------------------------------------------------
// BlockingDashboard
// ---------------------------------------------------------------------------

/// Synchronous facade over [`Dashboard`].
pub struct BlockingDashboard {
    runtime: Runtime,
    dashboard: Dashboard,
}

impl BlockingDashboard {
    pub fn builder() -> BlockingDashboardBuilder {
        BlockingDashboardBuilder::default()
    }

    /// Run a cycle with the current filters and return the committed view.
    pub fn refresh(&self) -> Result<ViewState> {
        let outcome = self.runtime.block_on(self.dashboard.refresh())?;
        Ok(self.committed_or_current(outcome))
    }

    /// Replace the filters, run a cycle, and return the committed view.
    pub fn apply_filters(&self, filters: FilterState) -> Result<ViewState> {
        let outcome = self.runtime.block_on(self.dashboard.apply_filters(filters))?;
        Ok(self.committed_or_current(outcome))
    }

    /// Re-fetch in the background whenever the filters change, starting
    /// with a cycle for the current ones.
    pub fn watch_filters(&self) -> JoinHandle<()> {
        let _entered = self.runtime.enter();
        self.dashboard.watch_filters()
    }

    pub fn filters(&self) -> FilterState {
        self.dashboard.filters()
    }

    /// Replace the filters without fetching. Picked up by
    /// [`watch_filters`](Self::watch_filters) when it is running.
    pub fn set_filters(&self, filters: FilterState) {
        self.dashboard.set_filters(filters);
    }

    pub fn view(&self) -> ViewState {
        self.dashboard.view()
    }

    /// Borrow the async dashboard, e.g. for its projections.
    ///
    /// Its spawning methods need a runtime context; outside one, use
    /// [`BlockingDashboard::watch_filters`] instead of
    /// [`Dashboard::watch_filters`].
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    // Another handle to the same dashboard may have started a newer cycle.
    fn committed_or_current(&self, outcome: SyncOutcome) -> ViewState {
        outcome.into_view().unwrap_or_else(|| self.dashboard.view())
    }
}
