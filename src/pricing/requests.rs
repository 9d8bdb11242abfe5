//! Request DTO and boundary validation for the quote endpoint.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::pricing::calculators::QuoteInput;
use crate::pricing::rates::{Tier, ALLOWED_TIERS};

/// Request to compute a fare quote.
///
/// Required fields arrive as options so validation can name what is
/// missing instead of failing opaquely during deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub tier: Option<String>,
    pub passengers: Option<i64>,
    #[serde(default)]
    pub luggage: Option<i64>,
    #[serde(default)]
    pub distance_km: Option<Decimal>,
    #[serde(default)]
    pub duration_min: Option<Decimal>,
    #[serde(default)]
    pub extra_stops: Option<i64>,
    #[serde(default)]
    pub child_seats: Option<i64>,
    #[serde(default)]
    pub meet_greet: bool,
    #[serde(default)]
    pub airport_pickup: bool,
}

impl QuoteRequest {
    /// Validate required fields and clamp the rest into a [`QuoteInput`].
    pub fn validate(&self) -> Result<QuoteInput, AppError> {
        let mut missing = Vec::new();
        if self.tier.is_none() {
            missing.push("tier");
        }
        if self.passengers.is_none() {
            missing.push("passengers");
        }
        if !missing.is_empty() {
            return Err(AppError::validation_with(
                "Missing fields",
                json!({
                    "missing": missing,
                    "expected": {
                        "tier": "Business | First | XL",
                        "passengers": "number",
                        "luggage": "number (optional)",
                    },
                }),
            ));
        }

        let tier_name = self.tier.as_deref().unwrap_or_default();
        let tier = Tier::parse(tier_name).ok_or_else(|| {
            AppError::validation_with("Invalid tier", json!({ "allowed": ALLOWED_TIERS }))
        })?;

        Ok(QuoteInput::clamped(
            tier,
            self.passengers.unwrap_or(1),
            self.luggage,
            self.distance_km,
            self.duration_min,
            self.extra_stops,
            self.child_seats,
            self.meet_greet,
            self.airport_pickup,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minimal_request_validates_with_defaults() {
        let request: QuoteRequest =
            serde_json::from_value(json!({ "tier": "Business", "passengers": 2 })).unwrap();
        let input = request.validate().unwrap();
        assert_eq!(input.tier, Tier::Business);
        assert_eq!(input.passengers, 2);
        assert_eq!(input.luggage, 0);
        assert_eq!(input.distance_km, dec!(12));
        assert_eq!(input.duration_min, dec!(25));
        assert!(!input.meet_greet);
    }

    #[test]
    fn test_missing_fields_named() {
        let request = QuoteRequest::default();
        match request.validate() {
            Err(AppError::Validation { details, .. }) => {
                let missing = &details.unwrap()["missing"];
                assert!(missing.as_array().unwrap().iter().any(|v| v == "tier"));
                assert!(missing.as_array().unwrap().iter().any(|v| v == "passengers"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tier_names_allowed_set() {
        let request: QuoteRequest =
            serde_json::from_value(json!({ "tier": "Economy", "passengers": 1 })).unwrap();
        match request.validate() {
            Err(AppError::Validation { details, .. }) => {
                assert_eq!(
                    details.unwrap()["allowed"],
                    json!(["Business", "First", "XL"])
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_camel_case_wire_fields() {
        let request: QuoteRequest = serde_json::from_value(json!({
            "tier": "XL",
            "passengers": 3,
            "distanceKm": 42.5,
            "durationMin": 55,
            "extraStops": 1,
            "childSeats": 1,
            "meetGreet": true,
            "airportPickup": true,
        }))
        .unwrap();
        let input = request.validate().unwrap();
        assert_eq!(input.distance_km, dec!(42.5));
        assert_eq!(input.duration_min, dec!(55));
        assert_eq!(input.extra_stops, 1);
        assert_eq!(input.child_seats, 1);
        assert!(input.meet_greet);
        assert!(input.airport_pickup);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let request: QuoteRequest = serde_json::from_value(json!({
            "tier": "First",
            "passengers": 99,
            "luggage": -2,
            "distanceKm": 9999,
        }))
        .unwrap();
        let input = request.validate().unwrap();
        assert_eq!(input.passengers, 6);
        assert_eq!(input.luggage, 0);
        assert_eq!(input.distance_km, dec!(500));
    }
}
