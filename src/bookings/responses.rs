//! Response DTOs for booking endpoints.

use serde::Serialize;
use uuid::Uuid;

use crate::bookings::models::{Booking, BookingStatus};

/// Response for a created booking (201)
#[derive(Debug, Serialize)]
pub struct BookingCreatedResponse {
    pub id: Uuid,
    pub status: BookingStatus,
}

impl From<&Booking> for BookingCreatedResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            status: booking.status,
        }
    }
}

/// Single-booking envelope
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking: Booking,
}

/// Booking list envelope, newest first
#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
}

/// Response carrying a freshly issued bearer token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
