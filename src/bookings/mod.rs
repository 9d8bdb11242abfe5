//! Booking records, lifecycle and persistence.

pub mod lifecycle;
pub mod models;
pub mod requests;
pub mod responses;
pub mod service;
pub mod store;

// Re-export commonly used items
pub use models::{Booking, BookingStatus, NewBooking};
pub use store::{BookingStore, MemoryBookingStore, PgBookingStore};
