//! HTTP route handlers and router assembly.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod quotes;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::AppState;

/// Health check
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

/// Assemble the application router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/quote", post(quotes::create))
        .route("/auth/guest", post(auth::guest_login))
        .route("/bookings", post(bookings::create).get(bookings::list_mine))
        .route("/bookings/:id", get(bookings::get_one))
        .route("/bookings/:id/cancel", post(bookings::cancel))
        .route("/admin/login", post(admin::login))
        .route("/admin/bookings", get(admin::list_all))
        .route(
            "/admin/bookings/:id",
            get(admin::get_one).patch(admin::update_status),
        )
}
