//! Quote route handler

use axum::{extract::State, Json};

use crate::auth::issue_quote_token;
use crate::error::{AppJson, Result};
use crate::pricing::{compute_quote, QuoteRequest, QuoteResponse};
use crate::AppState;

/// POST /quote
///
/// Stateless and unauthenticated: validates the ride parameters, prices
/// them and returns the quote with its breakdown and a short-lived token
/// locking the fare for booking creation.
pub async fn create(
    State(state): State<AppState>,
    AppJson(request): AppJson<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let input = request.validate()?;
    let price = compute_quote(&input, &state.config.currency);

    let quote_token = issue_quote_token(
        price.total,
        input.tier.as_str(),
        &state.config.currency,
        input.passengers,
        input.luggage,
        &state.config.jwt_secret,
        state.config.quote_ttl_secs,
    )?;

    Ok(Json(QuoteResponse {
        quote: price.total,
        currency: state.config.currency.clone(),
        breakdown: price.breakdown,
        quote_token,
    }))
}
