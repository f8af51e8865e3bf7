//! Presentation projections: status breakdown, stat cards, booking cards,
//! users, number formatting.

mod common;

use booking_dashboard::views::{
    booking_card, format_number, format_percent, format_rupees, project_users, revenue_series,
    stat_cards, status_breakdown, StatusBreakdown, Tone,
};
use booking_dashboard::{BookingRecord, MetricsSummary, TrendPoint};

fn metrics(confirmed: u64, pending: u64, cancelled: u64) -> MetricsSummary {
    MetricsSummary {
        total_bookings: confirmed + pending + cancelled,
        confirmed,
        pending,
        cancelled,
        total_revenue: 1234567.0,
        average_booking_value: 4500.5,
        occupancy_rate: 72.5,
        conversion_rate: 40.0,
    }
}

fn bookings() -> Vec<BookingRecord> {
    serde_json::from_value(common::sample_bookings()).unwrap()
}

// ---------------------------------------------------------------------------
// status_breakdown
// ---------------------------------------------------------------------------

#[test]
fn all_zero_counts_are_no_data() {
    let breakdown = status_breakdown(&metrics(0, 0, 0));
    assert_eq!(breakdown, StatusBreakdown::NoData);
    assert!(breakdown.is_empty());
    assert_eq!(breakdown.total(), 0);
}

#[test]
fn breakdown_has_three_slices_summing_to_total() {
    let breakdown = status_breakdown(&metrics(5, 2, 1));
    let slices = breakdown.slices();
    assert_eq!(slices.len(), 3);
    assert_eq!(slices[0].label, "Confirmed");
    assert_eq!(slices[0].count, 5);
    assert_eq!(slices[1].label, "Pending");
    assert_eq!(slices[1].count, 2);
    assert_eq!(slices[2].label, "Cancelled");
    assert_eq!(slices[2].count, 1);
    assert_eq!(breakdown.total(), 8);
}

#[test]
fn single_nonzero_status_still_renders_all_slices() {
    let breakdown = status_breakdown(&metrics(0, 0, 4));
    assert_eq!(breakdown.slices().len(), 3);
    assert_eq!(breakdown.total(), 4);
}

#[test]
fn status_total_saturates() {
    let mut m = metrics(1, 0, 0);
    m.confirmed = u64::MAX;
    m.pending = 2;
    assert_eq!(m.status_total(), u64::MAX);
    assert!(m.validate().is_err());
    assert_eq!(status_breakdown(&m).total(), u64::MAX);
}

#[test]
fn breakdown_serializes_with_kind_tag() {
    let json = serde_json::to_value(status_breakdown(&metrics(0, 0, 0))).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "no_data" }));
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[test]
fn stat_cards_format_headline_figures() {
    let cards = stat_cards(&metrics(5, 2, 1));
    assert_eq!(cards.len(), 4);

    assert_eq!(cards[0].title, "Total Bookings");
    assert_eq!(cards[0].value, "8");
    assert_eq!(cards[0].subtitle.as_deref(), Some("5 confirmed"));

    assert_eq!(cards[1].title, "Total Revenue");
    assert_eq!(cards[1].value, "₹1,234,567");
    assert_eq!(cards[1].subtitle.as_deref(), Some("Avg: ₹4500.5"));

    assert_eq!(cards[2].value, "72.5%");
    assert_eq!(cards[3].value, "40%");
    assert!(cards[3].subtitle.is_none());
}

#[test]
fn booking_card_formats_amount_and_tones() {
    let bookings = bookings();

    let first = booking_card(&bookings[0]);
    assert_eq!(first.key, "101");
    assert_eq!(first.amount, "₹12,500");
    assert_eq!(first.status, "confirmed");
    assert_eq!(first.status_tone, Tone::Positive);
    assert_eq!(first.payment_tone, Tone::Positive);

    let second = booking_card(&bookings[1]);
    assert_eq!(second.key, "bk-102");
    assert_eq!(second.amount, "₹48,000.5");
    assert_eq!(second.status_tone, Tone::Warning);
    assert_eq!(second.payment, "pending");
    assert_eq!(second.payment_tone, Tone::Warning);

    let third = booking_card(&bookings[2]);
    assert_eq!(third.status_tone, Tone::Negative);
    assert_eq!(third.payment_tone, Tone::Warning);
}

#[test]
fn revenue_series_keeps_order() {
    let trends = vec![
        TrendPoint {
            month: "Jan".into(),
            revenue: 10.0,
        },
        TrendPoint {
            month: "Feb".into(),
            revenue: 20.0,
        },
    ];
    assert_eq!(revenue_series(&trends), vec![("Jan", 10.0), ("Feb", 20.0)]);
}

// ---------------------------------------------------------------------------
// Users projection
// ---------------------------------------------------------------------------

#[test]
fn users_are_projected_one_per_booking() {
    let users = project_users(&bookings());
    assert_eq!(users.len(), 3);

    assert_eq!(users[0].id, "101");
    assert_eq!(users[0].name, "Aarav Sharma");
    assert_eq!(users[0].email, "aaravsharma@gmail.com");
    assert_eq!(users[0].city, "Mumbai");
    assert_eq!(users[0].last_booking.as_deref(), Some("2024-04-20"));

    assert_eq!(users[1].city, "Goa");
    assert_eq!(users[1].last_booking, None);
}

#[test]
fn email_handle_drops_spaces_only() {
    let mut booking = bookings().remove(0);
    booking.guest_name = "Meera\tIyer Rao".into();
    let users = project_users(&[booking]);
    assert_eq!(users[0].email, "meera\tiyerrao@gmail.com");
}

#[test]
fn single_word_hotel_falls_back_to_country() {
    let users = project_users(&bookings());
    assert_eq!(users[2].city, "India");
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[test]
fn format_number_groups_thousands() {
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(999.0), "999");
    assert_eq!(format_number(1000.0), "1,000");
    assert_eq!(format_number(1234567.891), "1,234,567.891");
    assert_eq!(format_number(-2500.25), "-2,500.25");
}

#[test]
fn format_number_rounds_to_three_decimals() {
    assert_eq!(format_number(1.23456), "1.235");
    assert_eq!(format_number(0.0004), "0");
}

#[test]
fn rupees_and_percent() {
    assert_eq!(format_rupees(64700.5), "₹64,700.5");
    assert_eq!(format_percent(100.0), "100%");
    assert_eq!(format_percent(33.3), "33.3%");
}
