//! Quote pricing engine.
//!
//! Pure, deterministic fare computation: a fixed per-tier fee table,
//! clamped ride parameters, multiplicative occupancy surcharges and a
//! per-tier minimum-fare floor. No state and no I/O.

pub mod calculators;
pub mod rates;
pub mod requests;
pub mod responses;

// Re-export commonly used items
pub use calculators::{compute_quote, round_money, QuoteInput, QuotePrice};
pub use rates::{Tier, TierRates, ALLOWED_TIERS};
pub use requests::QuoteRequest;
pub use responses::{QuoteBreakdown, QuoteResponse};
