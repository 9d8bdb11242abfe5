//! Admin route handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::{issue_bearer_token, Identity, Role};
use crate::bookings::requests::{AdminLoginRequest, UpdateStatusRequest};
use crate::bookings::responses::{BookingListResponse, BookingResponse, TokenResponse};
use crate::bookings::service;
use crate::error::{AppError, AppJson, Result};
use crate::AppState;

/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<AdminLoginRequest>,
) -> Result<Json<TokenResponse>> {
    if request.password.as_deref() != Some(state.config.admin_password.as_str()) {
        return Err(AppError::Unauthorized);
    }

    let token = issue_bearer_token(
        "admin",
        Role::Admin,
        &state.config.jwt_secret,
        state.config.token_ttl_secs,
    )?;

    Ok(Json(TokenResponse { token }))
}

/// GET /admin/bookings - every booking, newest first
pub async fn list_all(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<BookingListResponse>> {
    identity.require_admin()?;
    let bookings = state.store.list().await?;
    Ok(Json(BookingListResponse { bookings }))
}

/// GET /admin/bookings/:id
pub async fn get_one(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>> {
    identity.require_admin()?;
    let booking = state.store.get(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(BookingResponse { booking }))
}

/// PATCH /admin/bookings/:id - drive a lifecycle transition
pub async fn update_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<UpdateStatusRequest>,
) -> Result<Json<BookingResponse>> {
    let target = request.validate()?;
    let booking = service::transition_booking(state.store.as_ref(), &identity, id, target).await?;
    Ok(Json(BookingResponse { booking }))
}
