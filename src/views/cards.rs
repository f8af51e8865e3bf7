use serde::Serialize;

use super::format::{format_percent, format_rupees};
use crate::models::{BookingRecord, BookingStatus, MetricsSummary, PaymentStatus, TrendPoint};

// ---------------------------------------------------------------------------
// StatCard — Headline figures above the charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: Option<String>,
}

/// The four headline cards: bookings, revenue, occupancy, conversion.
pub fn stat_cards(metrics: &MetricsSummary) -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Total Bookings",
            value: metrics.total_bookings.to_string(),
            subtitle: Some(format!("{} confirmed", metrics.confirmed)),
        },
        StatCard {
            title: "Total Revenue",
            value: format_rupees(metrics.total_revenue),
            subtitle: Some(format!("Avg: ₹{}", metrics.average_booking_value)),
        },
        StatCard {
            title: "Occupancy Rate",
            value: format_percent(metrics.occupancy_rate),
            subtitle: None,
        },
        StatCard {
            title: "Conversion Rate",
            value: format_percent(metrics.conversion_rate),
            subtitle: None,
        },
    ]
}

// ---------------------------------------------------------------------------
// BookingCard
// ---------------------------------------------------------------------------

/// Colour family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Warning,
    Negative,
}

impl From<BookingStatus> for Tone {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Confirmed => Tone::Positive,
            BookingStatus::Pending => Tone::Warning,
            BookingStatus::Cancelled => Tone::Negative,
        }
    }
}

impl From<PaymentStatus> for Tone {
    fn from(status: PaymentStatus) -> Self {
        if status.is_paid() {
            Tone::Positive
        } else {
            Tone::Warning
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCard {
    pub key: String,
    pub guest_name: String,
    pub hotel_name: String,
    pub room_type: String,
    pub check_in: String,
    pub check_out: String,
    pub amount: String,
    pub status: &'static str,
    pub status_tone: Tone,
    pub payment: &'static str,
    pub payment_tone: Tone,
}

pub fn booking_card(booking: &BookingRecord) -> BookingCard {
    BookingCard {
        key: booking.id.to_string(),
        guest_name: booking.guest_name.clone(),
        hotel_name: booking.hotel_name.clone(),
        room_type: booking.room_type.clone(),
        check_in: booking.check_in.clone(),
        check_out: booking.check_out.clone(),
        amount: format_rupees(booking.amount),
        status: booking.status.as_str(),
        status_tone: booking.status.into(),
        payment: booking.payment_status.as_str(),
        payment_tone: booking.payment_status.into(),
    }
}

/// `(month, revenue)` pairs for the revenue line chart, in API order.
pub fn revenue_series(trends: &[TrendPoint]) -> Vec<(&str, f64)> {
    trends
        .iter()
        .map(|p| (p.month.as_str(), p.revenue))
        .collect()
}
