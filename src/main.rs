//! Server bootstrap.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use silverline_web::bookings::store::{BookingStore, MemoryBookingStore, PgBookingStore};
use silverline_web::config::AppConfig;
use silverline_web::{routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("silverline_web=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn BookingStore> = match &config.database_url {
        Some(url) => {
            let store = PgBookingStore::connect(url).await?;
            tracing::info!("Connected to Postgres booking store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, bookings are held in memory only");
            Arc::new(MemoryBookingStore::new())
        }
    };

    let port = config.port;
    let state = AppState::new(store, config);

    let app = routes::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Backend running on http://localhost:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
