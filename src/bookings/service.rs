//! Booking operations over the store.
//!
//! Creation prices the ride (or redeems a quote-lock token), everything
//! else is a thin, authorization-aware layer between handlers and the
//! store. Status changes run inside the store's per-id update so the
//! lifecycle check and the write are atomic.

use crate::auth::{verify_quote_token, Identity};
use crate::bookings::lifecycle;
use crate::bookings::models::{Booking, BookingStatus, NewBooking};
use crate::bookings::requests::CreateBookingRequest;
use crate::bookings::store::BookingStore;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::pricing::{compute_quote, QuoteInput};

/// Validate, price and persist a new booking for `identity`.
///
/// A valid `quote_token` locks the fare computed earlier by the quote
/// endpoint; its advisory breakdown (if the client echoed one) is stored
/// for audit. Without a token the ride is priced fresh, so a client-sent
/// `quote` number can never influence the stored fare.
pub async fn create_booking(
    store: &dyn BookingStore,
    config: &AppConfig,
    request: CreateBookingRequest,
    identity: &Identity,
) -> Result<Booking> {
    let validated = request.validate()?;

    let (quote, breakdown) = match &validated.quote_token {
        Some(token) => {
            let claims = verify_quote_token(token, &config.jwt_secret)?;
            if claims.currency != config.currency {
                return Err(AppError::validation(
                    "Quote token was issued for a different currency",
                ));
            }
            if claims.tier != validated.tier.as_str() {
                return Err(AppError::validation(
                    "Quote token was issued for a different tier",
                ));
            }
            if claims.passengers != i64::from(validated.passengers)
                || claims.luggage != i64::from(validated.luggage)
            {
                return Err(AppError::validation(
                    "Quote token was issued for different passenger or luggage counts",
                ));
            }
            (claims.quote, validated.breakdown.clone())
        }
        None => {
            let input = QuoteInput::clamped(
                validated.tier,
                i64::from(validated.passengers),
                Some(i64::from(validated.luggage)),
                None,
                None,
                None,
                None,
                false,
                false,
            );
            let price = compute_quote(&input, &config.currency);
            (price.total, Some(price.breakdown))
        }
    };

    let booking = store
        .create(NewBooking {
            customer: identity.subject.clone(),
            pickup: validated.pickup,
            dropoff: validated.dropoff,
            date: validated.date,
            time: validated.time,
            passengers: validated.passengers,
            luggage: validated.luggage,
            tier: validated.tier,
            quote,
            breakdown,
        })
        .await?;

    tracing::info!(
        booking_id = %booking.id,
        tier = %booking.tier,
        quote = booking.quote,
        "Booking created"
    );

    Ok(booking)
}

/// The caller's own bookings, newest first
pub async fn my_bookings(store: &dyn BookingStore, identity: &Identity) -> Result<Vec<Booking>> {
    store.list_for(&identity.subject).await
}

/// One of the caller's own bookings; other customers' ids read as unknown
pub async fn my_booking(
    store: &dyn BookingStore,
    identity: &Identity,
    id: uuid::Uuid,
) -> Result<Booking> {
    let booking = store.get(id).await?.ok_or(AppError::NotFound)?;
    if !identity.is_admin() && booking.customer != identity.subject {
        return Err(AppError::NotFound);
    }
    Ok(booking)
}

/// Move a booking to `target` on behalf of `identity`.
///
/// Role and state-machine checks happen inside the store's atomic update;
/// unknown targets are rejected earlier at the boundary.
pub async fn transition_booking(
    store: &dyn BookingStore,
    identity: &Identity,
    id: uuid::Uuid,
    target: BookingStatus,
) -> Result<Booking> {
    let identity = identity.clone();
    let updated = store
        .update(
            id,
            Box::new(move |booking| lifecycle::transition(booking, target, &identity)),
        )
        .await?;

    tracing::info!(booking_id = %updated.id, status = %updated.status, "Booking status updated");
    Ok(updated)
}
