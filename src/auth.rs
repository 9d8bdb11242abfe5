//! Bearer-token authentication and the quote-lock token.
//!
//! The service treats authentication as "credential in, identity + role
//! out": handlers receive an [`Identity`] extracted from the Authorization
//! header and never look at the token themselves. The same signing secret
//! also backs the short-lived quote-lock token that pins a server-computed
//! fare to a later booking request.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::AppState;

/// Caller role carried in bearer tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Role::Customer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Authenticated caller, as seen by handlers and the booking lifecycle
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Reject callers without the admin role
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin role required".to_string()))
        }
    }
}

/// JWT claims for bearer tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Issue a signed bearer token for the given subject and role
pub fn issue_bearer_token(
    subject: &str,
    role: Role,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: subject.to_string(),
        role: role.as_str().to_string(),
        exp: (Utc::now() + Duration::seconds(ttl_secs)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))
}

/// Decode a bearer token into an [`Identity`]
pub fn verify_bearer_token(token: &str, secret: &str) -> Result<Identity, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;

    let role = Role::parse(&data.claims.role).ok_or(AppError::Unauthorized)?;

    Ok(Identity {
        subject: data.claims.sub,
        role,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

        verify_bearer_token(token, &state.config.jwt_secret)
    }
}

/// Claims binding a computed fare to a later booking request
#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteClaims {
    pub sub: String,
    pub quote: i64,
    pub tier: String,
    pub currency: String,
    pub passengers: i64,
    pub luggage: i64,
    pub exp: usize,
}

/// Sign a quote-lock token for a freshly computed fare.
///
/// Every input that scales the fare is pinned in the claims, so the
/// booking request cannot reuse a cheap quote for a costlier ride.
pub fn issue_quote_token(
    quote: i64,
    tier: &str,
    currency: &str,
    passengers: i64,
    luggage: i64,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    let claims = QuoteClaims {
        sub: "quote".to_string(),
        quote,
        tier: tier.to_string(),
        currency: currency.to_string(),
        passengers,
        luggage,
        exp: (Utc::now() + Duration::seconds(ttl_secs)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))
}

/// Verify a quote-lock token; expired or tampered tokens are a validation
/// error since the caller can simply request a fresh quote.
pub fn verify_quote_token(token: &str, secret: &str) -> Result<QuoteClaims, AppError> {
    decode::<QuoteClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::validation("Invalid or expired quote_token"))
}
