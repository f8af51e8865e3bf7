//! The users table.
//!
//! The API has no user resource. Users are projected from bookings, one row
//! per booking, and never written back.

use serde::Serialize;

use crate::models::BookingRecord;

const EMAIL_DOMAIN: &str = "gmail.com";
const FALLBACK_CITY: &str = "India";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub city: String,
    /// `YYYY-MM-DD` part of the booking timestamp, when the API sent one.
    pub last_booking: Option<String>,
}

impl From<&BookingRecord> for UserRow {
    fn from(booking: &BookingRecord) -> Self {
        let handle: String = booking
            .guest_name
            .split(' ')
            .collect::<String>()
            .to_lowercase();
        let city = booking
            .hotel_name
            .split(' ')
            .nth(1)
            .unwrap_or(FALLBACK_CITY)
            .to_string();
        let last_booking = booking
            .booking_date
            .as_deref()
            .map(|date| date.chars().take(10).collect());

        Self {
            id: booking.id.to_string(),
            name: booking.guest_name.clone(),
            email: format!("{}@{}", handle, EMAIL_DOMAIN),
            city,
            last_booking,
        }
    }
}

pub fn project_users(bookings: &[BookingRecord]) -> Vec<UserRow> {
    bookings.iter().map(UserRow::from).collect()
}
