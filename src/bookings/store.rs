//! Booking persistence.
//!
//! Everything above this module talks to the [`BookingStore`] trait; the
//! Postgres implementation backs production while the in-memory one backs
//! tests and DATABASE_URL-less development. Both guarantee that
//! `update` is atomic per booking id: the read-modify-write on a single
//! record never interleaves with another update to the same id.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::bookings::models::{Booking, BookingStatus, NewBooking};
use crate::error::{AppError, Result};
use crate::pricing::Tier;

/// Record mutation applied under the store's per-id atomicity guarantee.
/// An `Err` from the mutator aborts the update and leaves the record
/// untouched.
pub type Mutator = Box<dyn FnOnce(&mut Booking) -> Result<()> + Send>;

/// Durable collection of bookings. Owns no business logic.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist a new booking; the store assigns id, initial status and
    /// creation timestamp.
    async fn create(&self, new: NewBooking) -> Result<Booking>;

    /// Fetch one booking by id
    async fn get(&self, id: Uuid) -> Result<Option<Booking>>;

    /// All bookings, newest first
    async fn list(&self) -> Result<Vec<Booking>>;

    /// One customer's bookings, newest first
    async fn list_for(&self, customer: &str) -> Result<Vec<Booking>>;

    /// Atomically read-modify-write a single booking
    async fn update(&self, id: Uuid, mutate: Mutator) -> Result<Booking>;
}

fn mint(new: NewBooking) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        customer: new.customer,
        pickup: new.pickup,
        dropoff: new.dropoff,
        date: new.date,
        time: new.time,
        passengers: new.passengers,
        luggage: new.luggage,
        tier: new.tier,
        quote: new.quote,
        breakdown: new.breakdown,
        status: BookingStatus::Requested,
        created_at: Utc::now(),
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Mutex-guarded vector, newest first. The single lock trivially satisfies
/// per-id update atomicity.
#[derive(Default)]
pub struct MemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn create(&self, new: NewBooking) -> Result<Booking> {
        let booking = mint(new);
        let mut bookings = self.bookings.lock().await;
        bookings.insert(0, booking.clone());
        Ok(booking)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>> {
        let bookings = self.bookings.lock().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        Ok(bookings.clone())
    }

    async fn list_for(&self, customer: &str) -> Result<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        Ok(bookings
            .iter()
            .filter(|b| b.customer == customer)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, mutate: Mutator) -> Result<Booking> {
        let mut bookings = self.bookings.lock().await;
        let slot = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(AppError::NotFound)?;

        // Mutate a copy so a rejected transition leaves the record intact
        let mut draft = slot.clone();
        mutate(&mut draft)?;
        *slot = draft.clone();
        Ok(draft)
    }
}

// ============================================================================
// Postgres store
// ============================================================================

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS bookings (
    id UUID PRIMARY KEY,
    customer TEXT NOT NULL,
    pickup TEXT NOT NULL,
    dropoff TEXT NOT NULL,
    ride_date DATE NOT NULL,
    ride_time TIME NOT NULL,
    passengers INT NOT NULL,
    luggage INT NOT NULL,
    tier TEXT NOT NULL,
    quote BIGINT NOT NULL,
    breakdown JSONB,
    status TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
)
"#;

const SELECT_COLUMNS: &str = "id, customer, pickup, dropoff, ride_date, ride_time, \
     passengers, luggage, tier, quote, breakdown, status, created_at";

/// sqlx-backed store; one row per booking, breakdown as JSONB.
pub struct PgBookingStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    customer: String,
    pickup: String,
    dropoff: String,
    ride_date: chrono::NaiveDate,
    ride_time: chrono::NaiveTime,
    passengers: i32,
    luggage: i32,
    tier: String,
    quote: i64,
    breakdown: Option<serde_json::Value>,
    status: String,
    created_at: chrono::DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self> {
        let tier = Tier::parse(&row.tier)
            .ok_or_else(|| AppError::Internal(format!("Unknown tier in storage: {}", row.tier)))?;
        let status = BookingStatus::parse(&row.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown status in storage: {}", row.status))
        })?;
        let breakdown = match row.breakdown {
            Some(value) => Some(serde_json::from_value(value).map_err(|e| {
                AppError::Internal(format!("Corrupt breakdown for booking {}: {}", row.id, e))
            })?),
            None => None,
        };

        Ok(Booking {
            id: row.id,
            customer: row.customer,
            pickup: row.pickup,
            dropoff: row.dropoff,
            date: row.ride_date,
            time: row.ride_time,
            passengers: row.passengers,
            luggage: row.luggage,
            tier,
            quote: row.quote,
            breakdown,
            status,
            created_at: row.created_at,
        })
    }
}

impl PgBookingStore {
    /// Connect and ensure the bookings table exists
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn create(&self, new: NewBooking) -> Result<Booking> {
        let booking = mint(new);
        let breakdown = booking
            .breakdown
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::Internal(format!("Breakdown serialization failed: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, customer, pickup, dropoff, ride_date, ride_time,
                 passengers, luggage, tier, quote, breakdown, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(booking.id)
        .bind(&booking.customer)
        .bind(&booking.pickup)
        .bind(&booking.dropoff)
        .bind(booking.date)
        .bind(booking.time)
        .bind(booking.passengers)
        .bind(booking.luggage)
        .bind(booking.tier.as_str())
        .bind(booking.quote)
        .bind(breakdown)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Booking::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn list_for(&self, customer: &str) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE customer = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(customer)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn update(&self, id: Uuid, mutate: Mutator) -> Result<Booking> {
        let mut tx = self.pool.begin().await?;

        // Row lock holds off concurrent updates to the same id
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE id = $1 FOR UPDATE",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let mut booking: Booking = row.ok_or(AppError::NotFound)?.try_into()?;
        mutate(&mut booking)?;

        // status is the only mutable field
        sqlx::query("UPDATE bookings SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(booking.status.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(booking)
    }
}
