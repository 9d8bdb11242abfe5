//! Customer booking route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::Identity;
use crate::bookings::models::BookingStatus;
use crate::bookings::requests::CreateBookingRequest;
use crate::bookings::responses::{BookingCreatedResponse, BookingListResponse, BookingResponse};
use crate::bookings::service;
use crate::error::{AppJson, Result};
use crate::AppState;

/// POST /bookings
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    AppJson(request): AppJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>)> {
    let booking =
        service::create_booking(state.store.as_ref(), &state.config, request, &identity).await?;
    Ok((StatusCode::CREATED, Json((&booking).into())))
}

/// GET /bookings - the caller's bookings, newest first
pub async fn list_mine(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<BookingListResponse>> {
    let bookings = service::my_bookings(state.store.as_ref(), &identity).await?;
    Ok(Json(BookingListResponse { bookings }))
}

/// GET /bookings/:id
pub async fn get_one(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>> {
    let booking = service::my_booking(state.store.as_ref(), &identity, id).await?;
    Ok(Json(BookingResponse { booking }))
}

/// POST /bookings/:id/cancel - self-service cancel
pub async fn cancel(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>> {
    let booking = service::transition_booking(
        state.store.as_ref(),
        &identity,
        id,
        BookingStatus::Cancelled,
    )
    .await?;
    Ok(Json(BookingResponse { booking }))
}
