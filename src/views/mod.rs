//! Read-only projections of the committed view state into display rows.
//!
//! Nothing here fetches or mutates state; every function is a pure mapping
//! from model values to what a widget shows.

pub mod cards;
pub mod format;
pub mod status;
pub mod users;

pub use cards::{booking_card, revenue_series, stat_cards, BookingCard, StatCard, Tone};
pub use format::{format_number, format_percent, format_rupees};
pub use status::{status_breakdown, StatusBreakdown, StatusSlice};
pub use users::{project_users, UserRow};
