//! The remote data synchronizer.
//!
//! One [`Synchronizer::sync`] call is a *cycle*: mark loading, fetch bookings,
//! metrics and trends concurrently, then commit all three into the view store
//! in a single update, or commit nothing.
//!
//! Every cycle takes the next sequence number when it starts. At commit time a
//! cycle only writes if no newer cycle has started since, so a slow response
//! to an old filter set can never overwrite data for the current one. Stale
//! cycles are reported as [`SyncOutcome::Superseded`] and leave the view alone.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::BookingApi;
use crate::error::Result;
use crate::models::{FilterState, ViewState};
use crate::request::CycleTargets;
use crate::store::Store;

/// How a cycle ended, when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The cycle's data is now the view state (returned as committed).
    Committed(ViewState),
    /// A newer cycle started before this one finished; its result, success
    /// or failure, was dropped.
    Superseded { cycle: u64, latest: u64 },
}

impl SyncOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, SyncOutcome::Committed(_))
    }

    /// The committed view, if this cycle won.
    pub fn into_view(self) -> Option<ViewState> {
        match self {
            SyncOutcome::Committed(view) => Some(view),
            SyncOutcome::Superseded { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Synchronizer
// ---------------------------------------------------------------------------

/// Keeps the filter store and the view store consistent with the remote API.
pub struct Synchronizer {
    api: Arc<dyn BookingApi>,
    filters: Store<FilterState>,
    view: Store<ViewState>,
    issued: AtomicU64,
}

impl Synchronizer {
    pub fn new(api: Arc<dyn BookingApi>, initial_filters: FilterState) -> Self {
        Self {
            api,
            filters: Store::new(initial_filters),
            view: Store::default(),
            issued: AtomicU64::new(0),
        }
    }

    // -- State access ------------------------------------------------------

    /// Current committed view.
    pub fn view(&self) -> ViewState {
        self.view.snapshot()
    }

    pub fn view_store(&self) -> &Store<ViewState> {
        &self.view
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    pub fn filters(&self) -> FilterState {
        self.filters.snapshot()
    }

    pub fn filter_store(&self) -> &Store<FilterState> {
        &self.filters
    }

    /// Sequence number of the most recently started cycle (0 if none).
    pub fn latest_cycle(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    // -- Filter updates ----------------------------------------------------

    /// Replace the filters without fetching. A running
    /// [`watch_filters`](Self::watch_filters) task picks the change up.
    pub fn set_filters(&self, filters: FilterState) {
        self.filters.set(filters);
    }

    /// Edit the filters in place without fetching.
    pub fn update_filters(&self, f: impl FnOnce(&mut FilterState)) {
        self.filters.update(f);
    }

    /// Replace the filters and run a cycle for them.
    pub async fn apply_filters(&self, filters: FilterState) -> Result<SyncOutcome> {
        self.filters.set(filters);
        self.sync(filters).await
    }

    /// Re-run a cycle with the current filters.
    pub async fn refresh(&self) -> Result<SyncOutcome> {
        let filters = self.filters.snapshot();
        self.sync(filters).await
    }

    // -- Cycles --------------------------------------------------------------

    /// Run one fetch cycle for `filters`.
    ///
    /// Fails with the first error in bookings, metrics, trends order when any
    /// of the three requests fails; the view then keeps its previous data.
    /// The loading flag is cleared on every exit path, including when the
    /// returned future is dropped before completion.
    pub async fn sync(&self, filters: FilterState) -> Result<SyncOutcome> {
        let cycle = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.update(|state| state.is_loading = true);
        let _loading = LoadingGuard {
            view: &self.view,
            issued: &self.issued,
            cycle,
        };

        let targets = CycleTargets::from_filters(&filters);
        info!(
            cycle,
            days = filters.window_days.days(),
            status = %filters.status_filter,
            order = %filters.sort_order,
            "sync cycle started"
        );

        let (bookings, metrics, trends) = tokio::join!(
            self.api.bookings(&targets.bookings),
            self.api.metrics(&targets.metrics),
            self.api.trends(&targets.trends)
        );

        let fetched = match (bookings, metrics, trends) {
            (Ok(bookings), Ok(metrics), Ok(trends)) => Ok((bookings, metrics, trends)),
            (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => Err(err),
        };

        let (bookings, metrics, trends) = match fetched {
            Ok(data) => data,
            Err(err) => {
                let latest = self.latest_cycle();
                if latest != cycle {
                    debug!(cycle, latest, error = %err, "stale cycle failed; ignoring");
                    return Ok(SyncOutcome::Superseded { cycle, latest });
                }
                warn!(
                    cycle,
                    endpoint = err.endpoint().map(|e| e.name()).unwrap_or("-"),
                    error = %err,
                    "sync cycle failed; keeping previous view"
                );
                return Err(err);
            }
        };

        let issued = &self.issued;
        let mut committed = None;
        self.view.update_if(|state| {
            if issued.load(Ordering::SeqCst) != cycle {
                return false;
            }
            state.bookings = bookings;
            state.metrics = Some(metrics);
            state.trends = trends;
            state.filters = Some(filters);
            state.cycle = cycle;
            state.is_loading = false;
            committed = Some(state.clone());
            true
        });

        match committed {
            Some(view) => {
                info!(
                    cycle,
                    bookings = view.bookings.len(),
                    trends = view.trends.len(),
                    "sync cycle committed"
                );
                Ok(SyncOutcome::Committed(view))
            }
            None => {
                let latest = self.latest_cycle();
                debug!(cycle, latest, "stale cycle result discarded");
                Ok(SyncOutcome::Superseded { cycle, latest })
            }
        }
    }

    /// Start a cycle for the current filters now and another one every time
    /// the filter store changes.
    ///
    /// Each cycle runs as its own task, so a quick succession of changes
    /// produces overlapping cycles of which only the newest commits. The
    /// watcher ends when the synchronizer is dropped.
    pub fn watch_filters(this: &Arc<Self>) -> JoinHandle<()> {
        let mut rx = this.filters.subscribe();
        let weak: Weak<Self> = Arc::downgrade(this);
        let initial = *rx.borrow_and_update();
        spawn_cycle(Arc::clone(this), initial);

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let filters = *rx.borrow_and_update();
                match weak.upgrade() {
                    Some(this) => spawn_cycle(this, filters),
                    None => break,
                }
            }
            debug!("filter watcher stopped");
        })
    }
}

fn spawn_cycle(sync: Arc<Synchronizer>, filters: FilterState) {
    tokio::spawn(async move {
        if let Err(err) = sync.sync(filters).await {
            warn!(%filters, error = %err, "background sync cycle failed");
        }
    });
}

/// Clears the loading flag when a cycle ends, however it ends.
///
/// Only the newest cycle may clear it: an older cycle finishing while a newer
/// one is still in flight leaves the indicator on.
struct LoadingGuard<'a> {
    view: &'a Store<ViewState>,
    issued: &'a AtomicU64,
    cycle: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let issued = self.issued;
        let cycle = self.cycle;
        self.view.update_if(|state| {
            if state.is_loading && issued.load(Ordering::SeqCst) == cycle {
                state.is_loading = false;
                true
            } else {
                false
            }
        });
    }
}
