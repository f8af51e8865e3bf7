use serde::Serialize;

use super::{BookingRecord, FilterState, MetricsSummary, TrendPoint};

// ---------------------------------------------------------------------------
// ViewState — The committed, UI-facing snapshot of remote data
// ---------------------------------------------------------------------------

/// What the dashboard renders.
///
/// `bookings`, `metrics`, `trends`, `filters` and `cycle` always come from the
/// same successful sync cycle. Only `is_loading` moves independently.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub bookings: Vec<BookingRecord>,
    pub metrics: Option<MetricsSummary>,
    pub trends: Vec<TrendPoint>,
    pub is_loading: bool,
    /// Filters the committed data was fetched with; `None` before the first
    /// commit.
    pub filters: Option<FilterState>,
    /// Sequence number of the cycle that produced this data; 0 before the
    /// first commit.
    pub cycle: u64,
}

impl ViewState {
    /// True until a cycle has committed.
    pub fn is_empty(&self) -> bool {
        self.cycle == 0
    }

    /// Same snapshot with the loading flag masked out, for comparing data
    /// across cycles.
    pub fn data_eq(&self, other: &ViewState) -> bool {
        self.bookings == other.bookings
            && self.metrics == other.metrics
            && self.trends == other.trends
            && self.filters == other.filters
            && self.cycle == other.cycle
    }
}
