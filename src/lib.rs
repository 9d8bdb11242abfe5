//! Silverline Chauffeurs booking and quote API.
//!
//! A small Axum service: stateless fare quotes from a fixed per-tier fee
//! table, persisted booking requests, and admin-gated lifecycle updates.
//! Persistence sits behind the [`bookings::BookingStore`] trait so the
//! service runs against Postgres in production and an in-memory store in
//! tests.

pub mod auth;
pub mod bookings;
pub mod config;
pub mod error;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use crate::bookings::store::BookingStore;
use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookingStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
