//! Request DTOs and boundary validation for booking endpoints.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;

use crate::bookings::models::{BookingStatus, ALLOWED_STATUSES};
use crate::error::AppError;
use crate::pricing::calculators::clamp_count;
use crate::pricing::{QuoteBreakdown, Tier, ALLOWED_TIERS};

/// Request to create a booking.
///
/// `quote` is accepted for wire compatibility but never trusted; the fare
/// is either locked through `quote_token` or re-priced server-side.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub passengers: Option<i64>,
    #[serde(default)]
    pub luggage: Option<i64>,
    pub tier: Option<String>,
    #[serde(default)]
    pub quote: Option<i64>,
    #[serde(default)]
    pub breakdown: Option<QuoteBreakdown>,
    #[serde(default)]
    pub quote_token: Option<String>,
}

/// Booking fields after boundary validation and clamping
#[derive(Debug)]
pub struct ValidatedBooking {
    pub pickup: String,
    pub dropoff: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub passengers: i32,
    pub luggage: i32,
    pub tier: Tier,
    pub breakdown: Option<QuoteBreakdown>,
    pub quote_token: Option<String>,
}

impl CreateBookingRequest {
    pub fn validate(self) -> Result<ValidatedBooking, AppError> {
        let mut missing = Vec::new();
        let pickup = non_empty(&self.pickup);
        let dropoff = non_empty(&self.dropoff);
        if pickup.is_none() {
            missing.push("pickup");
        }
        if dropoff.is_none() {
            missing.push("dropoff");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.time.is_none() {
            missing.push("time");
        }
        if self.passengers.is_none() {
            missing.push("passengers");
        }
        if self.tier.is_none() {
            missing.push("tier");
        }
        if !missing.is_empty() {
            return Err(AppError::validation_with(
                "Missing/invalid fields",
                json!({
                    "missing": missing,
                    "expected": {
                        "pickup": "string",
                        "dropoff": "string",
                        "date": "YYYY-MM-DD",
                        "time": "HH:MM",
                        "passengers": "number",
                        "luggage": "number (optional)",
                        "tier": "Business | First | XL",
                    },
                }),
            ));
        }

        let date = NaiveDate::parse_from_str(self.date.as_deref().unwrap_or_default(), "%Y-%m-%d")
            .map_err(|_| AppError::validation("Invalid date, expected YYYY-MM-DD"))?;
        let time = NaiveTime::parse_from_str(self.time.as_deref().unwrap_or_default(), "%H:%M")
            .map_err(|_| AppError::validation("Invalid time, expected HH:MM"))?;

        let tier = Tier::parse(self.tier.as_deref().unwrap_or_default()).ok_or_else(|| {
            AppError::validation_with("Invalid tier", json!({ "allowed": ALLOWED_TIERS }))
        })?;

        Ok(ValidatedBooking {
            pickup: pickup.unwrap_or_default(),
            dropoff: dropoff.unwrap_or_default(),
            date,
            time,
            passengers: clamp_count(self.passengers, 1, 6, 1) as i32,
            luggage: clamp_count(self.luggage, 0, 8, 0) as i32,
            tier,
            breakdown: self.breakdown,
            quote_token: self.quote_token,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Admin request to change a booking's status
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

impl UpdateStatusRequest {
    /// Reject unknown target statuses before any store mutation
    pub fn validate(&self) -> Result<BookingStatus, AppError> {
        let raw = self
            .status
            .as_deref()
            .ok_or_else(|| AppError::validation("Missing field: status"))?;
        BookingStatus::parse(raw).ok_or_else(|| {
            AppError::validation_with("Invalid status", json!({ "allowed": ALLOWED_STATUSES }))
        })
    }
}

/// Admin login request
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: Option<String>,
}
