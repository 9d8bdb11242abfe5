//! Guest authentication route handler

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::auth::{issue_bearer_token, Role};
use crate::bookings::responses::TokenResponse;
use crate::error::Result;
use crate::AppState;

/// POST /auth/guest
///
/// Issues a customer bearer token for an anonymous guest so booking
/// endpoints can attribute records to a creator.
pub async fn guest_login(State(state): State<AppState>) -> Result<Json<TokenResponse>> {
    let subject = format!("guest-{}", Uuid::new_v4());
    let token = issue_bearer_token(
        &subject,
        Role::Customer,
        &state.config.jwt_secret,
        state.config.token_ttl_secs,
    )?;

    Ok(Json(TokenResponse { token }))
}
