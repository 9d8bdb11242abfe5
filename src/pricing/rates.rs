//! Service tiers and the fixed fee table.
//!
//! One row per tier plus tier-independent extras fees. These constants are
//! the single pricing source of truth; the engine never reads rates from
//! anywhere else.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Service class determining the fee table row used for pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Business,
    First,
    #[serde(rename = "XL")]
    Xl,
}

pub const ALLOWED_TIERS: [&str; 3] = ["Business", "First", "XL"];

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Business => "Business",
            Tier::First => "First",
            Tier::Xl => "XL",
        }
    }

    /// Parse a tier name as received on the wire
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Business" => Some(Tier::Business),
            "First" => Some(Tier::First),
            "XL" => Some(Tier::Xl),
            _ => None,
        }
    }

    /// Fee table row for this tier
    pub fn rates(&self) -> TierRates {
        match self {
            Tier::Business => TierRates {
                base_fee: dec!(25),
                per_km: dec!(2.40),
                per_min: dec!(0.35),
                minimum_fare: dec!(70),
            },
            Tier::Xl => TierRates {
                base_fee: dec!(32),
                per_km: dec!(2.90),
                per_min: dec!(0.45),
                minimum_fare: dec!(90),
            },
            Tier::First => TierRates {
                base_fee: dec!(40),
                per_km: dec!(3.60),
                per_min: dec!(0.55),
                minimum_fare: dec!(110),
            },
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-tier pricing constants
#[derive(Debug, Clone, Copy)]
pub struct TierRates {
    pub base_fee: Decimal,
    pub per_km: Decimal,
    pub per_min: Decimal,
    pub minimum_fare: Decimal,
}

/// Flat fee for meet & greet service
pub fn meet_greet_fee() -> Decimal {
    dec!(15)
}

/// Flat fee for airport pickup handling
pub fn airport_pickup_fee() -> Decimal {
    dec!(10)
}

/// Fee per extra stop along the route
pub fn extra_stop_fee() -> Decimal {
    dec!(8)
}

/// Fee per fitted child seat
pub fn child_seat_fee() -> Decimal {
    dec!(6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parse_round_trip() {
        for name in ALLOWED_TIERS {
            let tier = Tier::parse(name).unwrap();
            assert_eq!(tier.as_str(), name);
        }
    }

    #[test]
    fn test_unknown_tier_rejected() {
        assert!(Tier::parse("Economy").is_none());
        assert!(Tier::parse("business").is_none());
        assert!(Tier::parse("").is_none());
    }

    #[test]
    fn test_tier_serde_names() {
        assert_eq!(serde_json::to_string(&Tier::Xl).unwrap(), "\"XL\"");
        assert_eq!(
            serde_json::from_str::<Tier>("\"Business\"").unwrap(),
            Tier::Business
        );
    }

    #[test]
    fn test_rate_table_ordering() {
        // Business is the entry tier, First the premium one
        let business = Tier::Business.rates();
        let xl = Tier::Xl.rates();
        let first = Tier::First.rates();

        assert!(business.base_fee < xl.base_fee);
        assert!(xl.base_fee < first.base_fee);
        assert!(business.minimum_fare < xl.minimum_fare);
        assert!(xl.minimum_fare < first.minimum_fare);
        assert!(business.per_km < xl.per_km);
        assert!(xl.per_km < first.per_km);
    }
}
