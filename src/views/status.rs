use serde::Serialize;

use crate::models::MetricsSummary;

/// One wedge of the booking status chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub label: &'static str,
    pub count: u64,
}

/// Input for the status proportion chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "slices", rename_all = "snake_case")]
pub enum StatusBreakdown {
    /// Every counter is zero; render a placeholder instead of an empty chart.
    NoData,
    Slices(Vec<StatusSlice>),
}

impl StatusBreakdown {
    pub fn slices(&self) -> &[StatusSlice] {
        match self {
            StatusBreakdown::NoData => &[],
            StatusBreakdown::Slices(slices) => slices,
        }
    }

    pub fn total(&self) -> u64 {
        self.slices()
            .iter()
            .fold(0u64, |sum, s| sum.saturating_add(s.count))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StatusBreakdown::NoData)
    }
}

/// Split metrics into confirmed, pending and cancelled counts, in that order.
pub fn status_breakdown(metrics: &MetricsSummary) -> StatusBreakdown {
    if metrics.status_total() == 0 {
        return StatusBreakdown::NoData;
    }
    StatusBreakdown::Slices(vec![
        StatusSlice {
            label: "Confirmed",
            count: metrics.confirmed,
        },
        StatusSlice {
            label: "Pending",
            count: metrics.pending,
        },
        StatusSlice {
            label: "Cancelled",
            count: metrics.cancelled,
        },
    ])
}
