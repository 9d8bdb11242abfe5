//! Response DTOs for the quote endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::rates::Tier;

/// Itemized decomposition of a computed quote.
///
/// Advisory metadata stored for audit; the authoritative value is `total`.
/// Money parts and the two occupancy factors are rounded to 2 decimal
/// places for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBreakdown {
    pub tier: Tier,
    pub currency: String,
    pub passengers: i64,
    pub luggage: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub duration_min: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub distance_part: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub time_part: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub extras: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub raw: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub pax_factor: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub bag_factor: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub factored: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub minimum_fare: Decimal,
    pub total: i64,
}

/// Response for a computed quote
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quote: i64,
    pub currency: String,
    pub breakdown: QuoteBreakdown,
    /// Short-lived token locking this fare for booking creation
    pub quote_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_breakdown_serializes_decimals_as_strings() {
        let breakdown = QuoteBreakdown {
            tier: Tier::Business,
            currency: "GBP".to_string(),
            passengers: 1,
            luggage: 0,
            base_fee: dec!(25),
            distance_km: dec!(12),
            duration_min: dec!(25),
            distance_part: dec!(28.80),
            time_part: dec!(8.75),
            extras: dec!(0),
            raw: dec!(62.55),
            pax_factor: dec!(1.00),
            bag_factor: dec!(1.00),
            factored: dec!(62.55),
            minimum_fare: dec!(70),
            total: 70,
        };

        let value = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(value["distancePart"], "28.80");
        assert_eq!(value["tier"], "Business");
        assert_eq!(value["total"], 70);

        let back: QuoteBreakdown = serde_json::from_value(value).unwrap();
        assert_eq!(back, breakdown);
    }
}
