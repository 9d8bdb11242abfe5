//! Booking status state machine and transition authorization.
//!
//! Permitted edges:
//!
//! ```text
//! requested -> confirmed -> completed
//!     |             |
//!     +-> cancelled <+
//! ```
//!
//! `completed` and `cancelled` are terminal. Authorization is part of the
//! transition itself: admins may drive any permitted edge, a booking's
//! creator may only cancel it while it is still requested or confirmed.

use crate::auth::Identity;
use crate::bookings::models::{Booking, BookingStatus};
use crate::error::AppError;

/// Whether the state machine permits `from -> to`
pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Requested, Confirmed) | (Requested, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
    )
}

/// Whether `identity` may request moving `booking` to `target` at all.
///
/// This gates who may ask; whether the edge itself is legal is checked
/// separately so an admin driving an illegal edge gets a 409, not a 403.
fn authorize(identity: &Identity, booking: &Booking, target: BookingStatus) -> Result<(), AppError> {
    if identity.is_admin() {
        return Ok(());
    }

    if target != BookingStatus::Cancelled {
        return Err(AppError::Forbidden(
            "Only an admin may update booking status".to_string(),
        ));
    }

    if booking.customer != identity.subject {
        // The caller learns nothing about other customers' bookings
        return Err(AppError::NotFound);
    }

    Ok(())
}

/// Apply a status transition to `booking` on behalf of `identity`.
///
/// Meant to run inside the store's per-record update so the read and the
/// write cannot interleave with a concurrent transition on the same id.
pub fn transition(
    booking: &mut Booking,
    target: BookingStatus,
    identity: &Identity,
) -> Result<(), AppError> {
    authorize(identity, booking, target)?;

    if !can_transition(booking.status, target) {
        if booking.status == BookingStatus::Cancelled && target == BookingStatus::Cancelled {
            return Err(AppError::Conflict("Booking already cancelled".to_string()));
        }
        return Err(AppError::Conflict(format!(
            "Cannot move booking from {} to {}",
            booking.status, target
        )));
    }

    booking.status = target;
    Ok(())
}
