use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept by averaged and ratio metrics.
pub const METRIC_DECIMAL_PLACES: u32 = 2;

/// Rounds half away from zero, e.g. `2.345 -> 2.35` and `-2.345 -> -2.35`.
pub fn round_half_up(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}
