//! Shared test fixtures for the booking dashboard integration tests.
//!
//! Provides JSON payloads shaped like the booking API's responses, helpers
//! that mount them on an `httpmock` server, and [`FakeApi`], an in-process
//! [`BookingApi`] whose responses can be held back per window so tests can
//! control exactly when each cycle finishes.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use booking_dashboard::models::{BookingId, BookingStatus, PaymentStatus};
use booking_dashboard::{
    ApiEndpoint, BookingApi, BookingRecord, Dashboard, DashboardError, MetricsSummary,
    RequestTarget, Result, TrendPoint,
};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tokio::sync::watch;

/// Route library logs to the test harness. `RUST_LOG=booking_dashboard=debug`
/// shows cycle events.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

pub fn sample_bookings() -> Value {
    json!([
        {
            "id": 101,
            "guestName": "Aarav Sharma",
            "hotelName": "Taj Mumbai Palace",
            "roomType": "Deluxe",
            "checkIn": "2024-05-01",
            "checkOut": "2024-05-03",
            "amount": 12500,
            "status": "confirmed",
            "paymentStatus": "paid",
            "bookingDate": "2024-04-20T10:15:00.000Z"
        },
        {
            "id": "bk-102",
            "guestName": "Priya Nair",
            "hotelName": "Leela Goa Resort",
            "roomType": "Suite",
            "checkIn": "2024-05-04",
            "checkOut": "2024-05-08",
            "amount": 48000.5,
            "status": "pending",
            "paymentStatus": "pending"
        },
        {
            "id": 103,
            "guestName": "Rohan Gupta",
            "hotelName": "Oberoi",
            "roomType": "Standard",
            "checkIn": "2024-05-06",
            "checkOut": "2024-05-07",
            "amount": 4200,
            "status": "cancelled",
            "paymentStatus": "unpaid",
            "bookingDate": "2024-05-01T08:00:00.000Z"
        }
    ])
}

pub fn sample_metrics(total: u64) -> Value {
    json!({
        "totalBookings": total,
        "confirmed": 1,
        "pending": 1,
        "cancelled": 1,
        "totalRevenue": 64700.5,
        "averageBookingValue": 21566.83,
        "occupancyRate": 72.5,
        "conversionRate": 33.3
    })
}

pub fn sample_trends() -> Value {
    json!([
        { "month": "Dec", "revenue": 120000 },
        { "month": "Jan", "revenue": 135000 },
        { "month": "Feb", "revenue": 98000 },
        { "month": "Mar", "revenue": 142500 },
        { "month": "Apr", "revenue": 160000 },
        { "month": "May", "revenue": 64700.5 }
    ])
}

pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

// ---------------------------------------------------------------------------
// httpmock helpers
// ---------------------------------------------------------------------------

/// Mount all three endpoints for one window, answering instantly.
pub fn mount_window<'a>(server: &'a MockServer, days: u32) -> [httpmock::Mock<'a>; 2] {
    let days = days.to_string();
    let bookings = server.mock(|when, then| {
        when.method(GET)
            .path("/api/bookings")
            .query_param("days", days.as_str());
        then.status(200).json_body(envelope(sample_bookings()));
    });
    let metrics = server.mock(|when, then| {
        when.method(GET)
            .path("/api/metrics")
            .query_param("days", days.as_str());
        then.status(200).json_body(envelope(sample_metrics(3)));
    });
    [bookings, metrics]
}

pub fn mount_trends(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/trends")
            .query_param("months", "6");
        then.status(200).json_body(envelope(sample_trends()));
    })
}

/// Dashboard pointed at a mock server, without retries so failures surface
/// immediately.
pub fn dashboard_for(server: &MockServer) -> Dashboard {
    init_tracing();
    Dashboard::builder()
        .base_url(server.base_url())
        .timeout(Duration::from_secs(5))
        .max_retries(0)
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// FakeApi
// ---------------------------------------------------------------------------

/// In-process API. Data depends on the requested window so tests can tell
/// cycles apart: every booking id is prefixed with the window, and metrics
/// report `totalBookings == days`.
#[derive(Default)]
pub struct FakeApi {
    gates: Mutex<HashMap<String, watch::Sender<bool>>>,
    failures: Mutex<HashMap<(ApiEndpoint, String), u16>>,
    calls: Mutex<Vec<RequestTarget>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Hold every request for `days` until [`release`](Self::release).
    pub fn hold(&self, days: u32) {
        let (tx, _rx) = watch::channel(false);
        self.gates.lock().unwrap().insert(days.to_string(), tx);
    }

    pub fn release(&self, days: u32) {
        if let Some(gate) = self.gates.lock().unwrap().get(&days.to_string()) {
            gate.send_replace(true);
        }
    }

    /// Make `endpoint` answer HTTP `status` for window `days`.
    pub fn fail(&self, endpoint: ApiEndpoint, days: u32, status: u16) {
        self.failures
            .lock()
            .unwrap()
            .insert((endpoint, days.to_string()), status);
    }

    pub fn calls(&self) -> Vec<RequestTarget> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, target: &RequestTarget) -> Result<String> {
        self.calls.lock().unwrap().push(target.clone());
        // Trends carry no window, so they are never held.
        let days = target.param("days").unwrap_or("").to_string();

        let gate = self.gates.lock().unwrap().get(&days).map(|g| g.subscribe());
        if let Some(mut rx) = gate {
            let _ = rx.wait_for(|open| *open).await;
        }

        let status = self
            .failures
            .lock()
            .unwrap()
            .get(&(target.endpoint, days.clone()))
            .copied();
        if let Some(status) = status {
            return Err(DashboardError::Endpoint {
                endpoint: target.endpoint,
                status,
            });
        }
        Ok(days)
    }
}

#[async_trait]
impl BookingApi for FakeApi {
    async fn bookings(&self, target: &RequestTarget) -> Result<Vec<BookingRecord>> {
        let days = self.enter(target).await?;
        Ok((0..3)
            .map(|i| BookingRecord {
                id: BookingId::Text(format!("{}-{}", days, i)),
                guest_name: format!("Guest {}", i),
                hotel_name: "Taj Mumbai Palace".into(),
                room_type: "Deluxe".into(),
                check_in: "2024-05-01".into(),
                check_out: "2024-05-02".into(),
                amount: 1000.0,
                status: BookingStatus::Confirmed,
                payment_status: PaymentStatus::Paid,
                booking_date: None,
            })
            .collect())
    }

    async fn metrics(&self, target: &RequestTarget) -> Result<MetricsSummary> {
        let days: u64 = self.enter(target).await?.parse().unwrap_or(0);
        Ok(MetricsSummary {
            total_bookings: days,
            confirmed: days,
            ..MetricsSummary::default()
        })
    }

    async fn trends(&self, target: &RequestTarget) -> Result<Vec<TrendPoint>> {
        self.enter(target).await?;
        Ok(["Dec", "Jan", "Feb", "Mar", "Apr", "May"]
            .iter()
            .map(|m| TrendPoint {
                month: m.to_string(),
                revenue: 1000.0,
            })
            .collect())
    }
}

/// Dashboard over a [`FakeApi`].
pub fn fake_dashboard(api: Arc<FakeApi>) -> Dashboard {
    init_tracing();
    Dashboard::builder().api(api).build().unwrap()
}

/// Yield until `cond` holds. Spawned cycles only make progress while the
/// test task yields.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..10_000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
