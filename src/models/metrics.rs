use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MetricsSummary — Aggregates over the selected window, all statuses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_bookings: u64,
    pub confirmed: u64,
    pub pending: u64,
    pub cancelled: u64,
    pub total_revenue: f64,
    pub average_booking_value: f64,
    /// Percentage in `[0, 100]`.
    pub occupancy_rate: f64,
    /// Percentage in `[0, 100]`.
    pub conversion_rate: f64,
}

impl MetricsSummary {
    /// Sum of the three status counters, saturating at `u64::MAX`.
    pub fn status_total(&self) -> u64 {
        self.confirmed
            .saturating_add(self.pending)
            .saturating_add(self.cancelled)
    }

    /// Check the summary's internal consistency.
    ///
    /// Returns a description of the first violated constraint, if any.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let status_total = self
            .confirmed
            .checked_add(self.pending)
            .and_then(|sum| sum.checked_add(self.cancelled))
            .ok_or_else(|| "status counts overflow".to_string())?;
        if status_total > self.total_bookings {
            return Err(format!(
                "status counts sum to {} but totalBookings is {}",
                status_total, self.total_bookings
            ));
        }
        for (name, value) in [
            ("totalRevenue", self.total_revenue),
            ("averageBookingValue", self.average_booking_value),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, value));
            }
        }
        for (name, value) in [
            ("occupancyRate", self.occupancy_rate),
            ("conversionRate", self.conversion_rate),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("{} must be within 0..=100, got {}", name, value));
            }
        }
        Ok(())
    }
}
