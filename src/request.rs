//! Request target construction for the booking API.
//!
//! A [`RequestTarget`] is an endpoint plus its ordered query parameters. Values
//! are percent-encoded when the target is resolved against a base URL, never
//! spliced into the path by hand. Builder methods return `&mut Self` for
//! chaining.
//!
//! # Example
//!
//! ```rust
//! use booking_dashboard::request::{ApiEndpoint, RequestBuilder};
//! let target = RequestBuilder::new(ApiEndpoint::Bookings)
//!     .param("days", "7")
//!     .param_opt("status", None)
//!     .param("order", "asc")
//!     .build();
//! assert_eq!(target.query_string(), "days=7&order=asc");
//! ```

use std::fmt;

use url::Url;

use crate::config::{self, TREND_LOOKBACK_MONTHS};
use crate::error::{DashboardError, Result};
use crate::models::FilterState;

// ---------------------------------------------------------------------------
// ApiEndpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    Bookings,
    Metrics,
    Trends,
}

impl ApiEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ApiEndpoint::Bookings => config::BOOKINGS_PATH,
            ApiEndpoint::Metrics => config::METRICS_PATH,
            ApiEndpoint::Trends => config::TRENDS_PATH,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApiEndpoint::Bookings => "bookings",
            ApiEndpoint::Metrics => "metrics",
            ApiEndpoint::Trends => "trends",
        }
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// RequestTarget
// ---------------------------------------------------------------------------

/// One GET request: which endpoint, with which query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub endpoint: ApiEndpoint,
    pub params: Vec<(String, String)>,
}

impl RequestTarget {
    /// Look up a query parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters rendered as `k=v&k=v`, unencoded. Used for logging.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Resolve this target against the API base URL.
    ///
    /// The base may carry a path prefix (`https://host/prefix`); the endpoint
    /// path is appended to it.
    pub fn url(&self, base: &Url) -> Result<Url> {
        if base.cannot_be_a_base() {
            return Err(DashboardError::Config(format!(
                "base URL '{}' cannot carry a path",
                base
            )));
        }
        let mut url = base.clone();
        let prefix = base.path().trim_end_matches('/');
        url.set_path(&format!("{}{}", prefix, self.endpoint.path()));
        url.set_query(None);
        if !self.params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            f.write_str(self.endpoint.path())
        } else {
            write!(f, "{}?{}", self.endpoint.path(), self.query_string())
        }
    }
}

// ---------------------------------------------------------------------------
// RequestBuilder
// ---------------------------------------------------------------------------

/// Builds a [`RequestTarget`] parameter by parameter.
pub struct RequestBuilder {
    endpoint: ApiEndpoint,
    params: Vec<(String, String)>,
}

impl RequestBuilder {
    /// Create a builder for the given endpoint with no parameters.
    pub fn new(endpoint: ApiEndpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn param(&mut self, name: &str, value: impl ToString) -> &mut Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present.
    pub fn param_opt(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            self.params.push((name.to_string(), v.to_string()));
        }
        self
    }

    /// Finish the target.
    pub fn build(&self) -> RequestTarget {
        RequestTarget {
            endpoint: self.endpoint,
            params: self.params.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// CycleTargets
// ---------------------------------------------------------------------------

/// The three requests a sync cycle issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTargets {
    pub bookings: RequestTarget,
    pub metrics: RequestTarget,
    pub trends: RequestTarget,
}

impl CycleTargets {
    /// Derive the request targets for a filter set.
    ///
    /// Bookings honour every filter. Metrics only take the window since they
    /// are computed over the full status mix. Trends ignore the filters and
    /// always cover the fixed lookback.
    pub fn from_filters(filters: &FilterState) -> Self {
        let bookings = RequestBuilder::new(ApiEndpoint::Bookings)
            .param("days", filters.window_days.days())
            .param_opt("status", filters.status_filter.query_value())
            .param("order", filters.sort_order.as_str())
            .build();

        let metrics = RequestBuilder::new(ApiEndpoint::Metrics)
            .param("days", filters.window_days.days())
            .build();

        let trends = RequestBuilder::new(ApiEndpoint::Trends)
            .param("months", TREND_LOOKBACK_MONTHS)
            .build();

        Self {
            bookings,
            metrics,
            trends,
        }
    }
}
