use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// WindowDays — Lookback window for bookings and metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum WindowDays {
    #[default]
    Seven,
    Fourteen,
    Thirty,
}

impl WindowDays {
    pub const ALL: [WindowDays; 3] = [WindowDays::Seven, WindowDays::Fourteen, WindowDays::Thirty];

    pub fn days(&self) -> u32 {
        match self {
            WindowDays::Seven => 7,
            WindowDays::Fourteen => 14,
            WindowDays::Thirty => 30,
        }
    }

    /// Label shown in the window selector.
    pub fn label(&self) -> String {
        format!("Last {} days", self.days())
    }
}

impl TryFrom<u32> for WindowDays {
    type Error = DashboardError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            7 => Ok(WindowDays::Seven),
            14 => Ok(WindowDays::Fourteen),
            30 => Ok(WindowDays::Thirty),
            other => Err(DashboardError::InvalidFilter(format!(
                "window must be 7, 14 or 30 days, got {}",
                other
            ))),
        }
    }
}

impl From<WindowDays> for u32 {
    fn from(window: WindowDays) -> Self {
        window.days()
    }
}

impl FromStr for WindowDays {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days: u32 = s.trim().parse().map_err(|_| {
            DashboardError::InvalidFilter(format!("window days must be a number, got '{}'", s))
        })?;
        WindowDays::try_from(days)
    }
}

impl fmt::Display for WindowDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

// ---------------------------------------------------------------------------
// StatusFilter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Confirmed,
    Pending,
    Cancelled,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Confirmed => "confirmed",
            StatusFilter::Pending => "pending",
            StatusFilter::Cancelled => "cancelled",
        }
    }

    /// Value of the `status` query parameter. `All` sends no parameter.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            other => Some(other.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "confirmed" => Ok(StatusFilter::Confirmed),
            "pending" => Ok(StatusFilter::Pending),
            "cancelled" => Ok(StatusFilter::Cancelled),
            _ => Err(DashboardError::InvalidFilter(format!(
                "unknown status filter '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortOrder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// Wire value of the `order` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "Oldest First",
            SortOrder::Descending => "Newest First",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(DashboardError::InvalidFilter(format!(
                "unknown sort order '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FilterState — User-selected parameters for one fetch cycle
// ---------------------------------------------------------------------------

/// The filters a cycle fetches with.
///
/// A value is never mutated while a cycle uses it; changing filters means
/// replacing the whole value, which starts a new cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub window_days: WindowDays,
    pub status_filter: StatusFilter,
    pub sort_order: SortOrder,
}

impl FilterState {
    pub fn new(window_days: WindowDays, status_filter: StatusFilter, sort_order: SortOrder) -> Self {
        Self {
            window_days,
            status_filter,
            sort_order,
        }
    }

    /// Build filters from raw selector values, rejecting anything outside
    /// the allowed sets.
    pub fn parse(days: u32, status: &str, order: &str) -> crate::Result<Self> {
        Ok(Self {
            window_days: WindowDays::try_from(days)?,
            status_filter: status.parse()?,
            sort_order: order.parse()?,
        })
    }

    pub fn with_window(mut self, window_days: WindowDays) -> Self {
        self.window_days = window_days;
        self
    }

    pub fn with_status(mut self, status_filter: StatusFilter) -> Self {
        self.status_filter = status_filter;
        self
    }

    pub fn with_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "days={} status={} order={}",
            self.window_days, self.status_filter, self.sort_order
        )
    }
}
