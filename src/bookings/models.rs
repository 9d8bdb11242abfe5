//! Booking records and their status enumeration.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::{QuoteBreakdown, Tier};

/// Booking status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Requested,
    Confirmed,
    Completed,
    Cancelled,
}

pub const ALLOWED_STATUSES: [&str; 4] = ["requested", "confirmed", "completed", "cancelled"];

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Requested => "requested",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status as received on the wire or read from storage
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "requested" => Some(BookingStatus::Requested),
            "confirmed" => Some(BookingStatus::Confirmed),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted booking.
///
/// Everything except `status` is immutable after creation; `status` changes
/// only through the lifecycle transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    /// Identity subject of the creator
    pub customer: String,
    pub pickup: String,
    pub dropoff: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub passengers: i32,
    pub luggage: i32,
    pub tier: Tier,
    /// Whole currency units, fixed at creation
    pub quote: i64,
    pub breakdown: Option<QuoteBreakdown>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields the store needs to mint a new booking; id, initial status and
/// creation timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer: String,
    pub pickup: String,
    pub dropoff: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub passengers: i32,
    pub luggage: i32,
    pub tier: Tier,
    pub quote: i64,
    pub breakdown: Option<QuoteBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_round_trip() {
        for name in ALLOWED_STATUSES {
            assert_eq!(BookingStatus::parse(name).unwrap().as_str(), name);
        }
        assert!(BookingStatus::parse("archived").is_none());
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Requested).unwrap(),
            "\"requested\""
        );
        assert_eq!(
            serde_json::from_str::<BookingStatus>("\"cancelled\"").unwrap(),
            BookingStatus::Cancelled
        );
    }
}
