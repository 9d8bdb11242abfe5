//! Core quote calculation.
//!
//! Pure functions for fare math - no database access, no clock, no
//! randomness. Identical input always produces an identical quote and
//! breakdown.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::rates::{
    airport_pickup_fee, child_seat_fee, extra_stop_fee, meet_greet_fee, Tier,
};
use crate::pricing::responses::QuoteBreakdown;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use silverline_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Constrain an integer input to a closed range, substituting the default
/// when absent.
pub fn clamp_count(value: Option<i64>, min: i64, max: i64, default: i64) -> i64 {
    value.unwrap_or(default).clamp(min, max)
}

/// Constrain a decimal input to a closed range, substituting the default
/// when absent.
pub fn clamp_measure(value: Option<Decimal>, min: Decimal, max: Decimal, default: Decimal) -> Decimal {
    value.unwrap_or(default).clamp(min, max)
}

/// Ride parameters after clamping; the only input `compute_quote` accepts.
#[derive(Debug, Clone)]
pub struct QuoteInput {
    pub tier: Tier,
    pub passengers: i64,
    pub luggage: i64,
    pub distance_km: Decimal,
    pub duration_min: Decimal,
    pub extra_stops: i64,
    pub child_seats: i64,
    pub meet_greet: bool,
    pub airport_pickup: bool,
}

impl QuoteInput {
    /// Build a clamped input from raw (possibly absent) ride parameters.
    ///
    /// `tier` and `passengers` have no safe default and are validated
    /// before this point; everything else falls back per the fee schedule.
    #[allow(clippy::too_many_arguments)]
    pub fn clamped(
        tier: Tier,
        passengers: i64,
        luggage: Option<i64>,
        distance_km: Option<Decimal>,
        duration_min: Option<Decimal>,
        extra_stops: Option<i64>,
        child_seats: Option<i64>,
        meet_greet: bool,
        airport_pickup: bool,
    ) -> Self {
        Self {
            tier,
            passengers: clamp_count(Some(passengers), 1, 6, 1),
            luggage: clamp_count(luggage, 0, 8, 0),
            distance_km: clamp_measure(distance_km, dec!(1), dec!(500), dec!(12)),
            duration_min: clamp_measure(duration_min, dec!(5), dec!(600), dec!(25)),
            extra_stops: clamp_count(extra_stops, 0, 10, 0),
            child_seats: clamp_count(child_seats, 0, 4, 0),
            meet_greet,
            airport_pickup,
        }
    }
}

/// Computed fare: the authoritative total plus the advisory breakdown
#[derive(Debug, Clone)]
pub struct QuotePrice {
    pub total: i64,
    pub breakdown: QuoteBreakdown,
}

/// Compute a fare quote for a clamped ride.
///
/// Distance and time parts use the tier's per-km/per-min rates; extras are
/// flat fees; occupancy surcharges multiply the whole fare rather than
/// adding a flat amount, so large parties scale distance and time too.
/// The tier's minimum fare floors the result, which is then rounded to
/// whole currency units (banker's rounding, zero-decimal display).
pub fn compute_quote(input: &QuoteInput, currency: &str) -> QuotePrice {
    let rates = input.tier.rates();

    let distance_part = input.distance_km * rates.per_km;
    let time_part = input.duration_min * rates.per_min;

    let mut extras = Decimal::from(input.extra_stops) * extra_stop_fee()
        + Decimal::from(input.child_seats) * child_seat_fee();
    if input.meet_greet {
        extras += meet_greet_fee();
    }
    if input.airport_pickup {
        extras += airport_pickup_fee();
    }

    let raw = rates.base_fee + distance_part + time_part + extras;

    let pax_factor = Decimal::ONE + Decimal::from(input.passengers - 1) * dec!(0.06);
    let bag_factor = Decimal::ONE + Decimal::from((input.luggage - 1).max(0)) * dec!(0.03);

    let factored = raw * pax_factor * bag_factor;
    let floored = factored.max(rates.minimum_fare);
    let total = round_money(floored, 0).to_i64().unwrap_or(0);

    QuotePrice {
        total,
        breakdown: QuoteBreakdown {
            tier: input.tier,
            currency: currency.to_string(),
            passengers: input.passengers,
            luggage: input.luggage,
            base_fee: rates.base_fee,
            distance_km: input.distance_km,
            duration_min: input.duration_min,
            distance_part: round_money(distance_part, 2),
            time_part: round_money(time_part, 2),
            extras: round_money(extras, 2),
            raw: round_money(raw, 2),
            pax_factor: round_money(pax_factor, 2),
            bag_factor: round_money(bag_factor, 2),
            factored: round_money(factored, 2),
            minimum_fare: rates.minimum_fare,
            total,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input(tier: Tier) -> QuoteInput {
        QuoteInput::clamped(tier, 1, None, None, None, None, None, false, false)
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2)); // rounds down to even
        assert_eq!(round_money(dec!(3.5), 0), dec!(4)); // rounds up to even
        assert_eq!(round_money(dec!(4.5), 0), dec!(4)); // rounds down to even
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(347.7224), 0), dec!(348));
    }

    // ==================== clamping tests ====================

    #[test]
    fn test_clamp_count_defaults_when_absent() {
        assert_eq!(clamp_count(None, 0, 8, 0), 0);
        assert_eq!(clamp_count(None, 1, 6, 1), 1);
    }

    #[test]
    fn test_clamp_count_bounds() {
        assert_eq!(clamp_count(Some(-3), 0, 8, 0), 0);
        assert_eq!(clamp_count(Some(99), 1, 6, 1), 6);
        assert_eq!(clamp_count(Some(4), 1, 6, 1), 4);
    }

    #[test]
    fn test_clamp_measure_defaults_and_bounds() {
        assert_eq!(clamp_measure(None, dec!(1), dec!(500), dec!(12)), dec!(12));
        assert_eq!(
            clamp_measure(Some(dec!(0.2)), dec!(1), dec!(500), dec!(12)),
            dec!(1)
        );
        assert_eq!(
            clamp_measure(Some(dec!(9000)), dec!(1), dec!(500), dec!(12)),
            dec!(500)
        );
    }

    #[test]
    fn test_passenger_clamp_equivalence() {
        // passengers=0 prices identically to passengers=1
        let low = QuoteInput::clamped(Tier::Business, 0, None, None, None, None, None, false, false);
        let one = QuoteInput::clamped(Tier::Business, 1, None, None, None, None, None, false, false);
        assert_eq!(
            compute_quote(&low, "GBP").total,
            compute_quote(&one, "GBP").total
        );

        // passengers=99 prices identically to passengers=6
        let high =
            QuoteInput::clamped(Tier::First, 99, None, None, None, None, None, false, false);
        let six = QuoteInput::clamped(Tier::First, 6, None, None, None, None, None, false, false);
        assert_eq!(
            compute_quote(&high, "GBP").breakdown,
            compute_quote(&six, "GBP").breakdown
        );
    }

    // ==================== worked scenarios ====================

    #[test]
    fn test_business_default_ride_hits_minimum_fare() {
        // 12 km, 25 min, solo: raw = 25 + 28.80 + 8.75 = 62.55, floor binds
        let price = compute_quote(&base_input(Tier::Business), "GBP");

        assert_eq!(price.breakdown.distance_part, dec!(28.80));
        assert_eq!(price.breakdown.time_part, dec!(8.75));
        assert_eq!(price.breakdown.extras, dec!(0.00));
        assert_eq!(price.breakdown.raw, dec!(62.55));
        assert_eq!(price.breakdown.pax_factor, dec!(1.00));
        assert_eq!(price.breakdown.bag_factor, dec!(1.00));
        assert_eq!(price.breakdown.minimum_fare, dec!(70));
        assert_eq!(price.total, 70);
    }

    #[test]
    fn test_first_loaded_ride_exact_arithmetic() {
        // First, 4 pax, 3 bags, 50 km, 60 min, meet & greet + airport pickup
        let input = QuoteInput::clamped(
            Tier::First,
            4,
            Some(3),
            Some(dec!(50)),
            Some(dec!(60)),
            None,
            None,
            true,
            true,
        );
        let price = compute_quote(&input, "GBP");

        assert_eq!(price.breakdown.distance_part, dec!(180.00));
        assert_eq!(price.breakdown.time_part, dec!(33.00));
        assert_eq!(price.breakdown.extras, dec!(25.00));
        assert_eq!(price.breakdown.raw, dec!(278.00));
        assert_eq!(price.breakdown.pax_factor, dec!(1.18));
        assert_eq!(price.breakdown.bag_factor, dec!(1.06));
        // 278.00 * 1.18 * 1.06 = 347.7224
        assert_eq!(price.breakdown.factored, dec!(347.72));
        assert_eq!(price.total, 348);
    }

    #[test]
    fn test_extras_fees_sum() {
        let input = QuoteInput::clamped(
            Tier::Xl,
            2,
            None,
            None,
            None,
            Some(3),
            Some(2),
            true,
            true,
        );
        let price = compute_quote(&input, "GBP");
        // 3 stops * 8 + 2 seats * 6 + 15 + 10
        assert_eq!(price.breakdown.extras, dec!(61.00));
    }

    // ==================== properties ====================

    #[test]
    fn test_minimum_fare_floor_all_tiers() {
        // Shortest possible ride never undercuts the tier floor
        for tier in [Tier::Business, Tier::Xl, Tier::First] {
            let input = QuoteInput::clamped(
                tier,
                1,
                None,
                Some(dec!(1)),
                Some(dec!(5)),
                None,
                None,
                false,
                false,
            );
            let price = compute_quote(&input, "GBP");
            assert!(
                Decimal::from(price.total) >= tier.rates().minimum_fare,
                "tier {} quoted below its floor",
                tier
            );
        }
    }

    #[test]
    fn test_quote_monotonic_in_distance_and_duration() {
        let mut last = 0;
        for km in [1i64, 12, 50, 120, 500] {
            let input = QuoteInput::clamped(
                Tier::Xl,
                3,
                Some(2),
                Some(Decimal::from(km)),
                Some(dec!(45)),
                None,
                None,
                false,
                false,
            );
            let total = compute_quote(&input, "GBP").total;
            assert!(total >= last, "longer ride priced lower");
            last = total;
        }

        let mut last = 0;
        for minutes in [5i64, 25, 90, 240, 600] {
            let input = QuoteInput::clamped(
                Tier::Business,
                2,
                None,
                Some(dec!(30)),
                Some(Decimal::from(minutes)),
                None,
                None,
                false,
                false,
            );
            let total = compute_quote(&input, "GBP").total;
            assert!(total >= last, "slower ride priced lower");
            last = total;
        }
    }

    #[test]
    fn test_quote_monotonic_in_occupancy() {
        let mut last = 0;
        for pax in 1..=6 {
            let input = QuoteInput::clamped(
                Tier::First,
                pax,
                Some(4),
                Some(dec!(40)),
                Some(dec!(50)),
                None,
                None,
                false,
                false,
            );
            let total = compute_quote(&input, "GBP").total;
            assert!(total >= last);
            last = total;
        }

        let mut last = 0;
        for bags in 0..=8 {
            let input = QuoteInput::clamped(
                Tier::First,
                4,
                Some(bags),
                Some(dec!(40)),
                Some(dec!(50)),
                None,
                None,
                false,
                false,
            );
            let total = compute_quote(&input, "GBP").total;
            assert!(total >= last);
            last = total;
        }
    }

    #[test]
    fn test_single_bag_carries_no_surcharge() {
        let none = QuoteInput::clamped(
            Tier::Business,
            2,
            Some(0),
            Some(dec!(40)),
            Some(dec!(50)),
            None,
            None,
            false,
            false,
        );
        let one = QuoteInput::clamped(
            Tier::Business,
            2,
            Some(1),
            Some(dec!(40)),
            Some(dec!(50)),
            None,
            None,
            false,
            false,
        );
        assert_eq!(
            compute_quote(&none, "GBP").total,
            compute_quote(&one, "GBP").total
        );
    }

    #[test]
    fn test_deterministic() {
        let input = QuoteInput::clamped(
            Tier::Xl,
            5,
            Some(6),
            Some(dec!(77.5)),
            Some(dec!(83)),
            Some(2),
            Some(1),
            true,
            false,
        );
        let first = compute_quote(&input, "GBP");
        for _ in 0..10 {
            let again = compute_quote(&input, "GBP");
            assert_eq!(again.total, first.total);
            assert_eq!(again.breakdown, first.breakdown);
        }
    }
}
