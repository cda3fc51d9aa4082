use rust_decimal::prelude::*;

/// Decimal places kept on valuation outputs.
pub const VALUE_DP: u32 = 8;

/// Decimal places kept on percentage splits.
pub const PERCENT_DP: u32 = 4;

/// Rounds `value` to `dp` decimal places, half away from zero.
///
/// Values that do not fit in a `Decimal` (non-finite or beyond ~7.9e28)
/// are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_dp() {
        assert!((round_dp(5.719_095_841_793_66, VALUE_DP) - 5.719_095_84).abs() < 1e-12);
        assert!((round_dp(33.333_33, PERCENT_DP) - 33.3333).abs() < 1e-12);
        assert!((round_dp(0.000_06, PERCENT_DP) - 0.0001).abs() < 1e-12);
        assert!((round_dp(-0.000_06, PERCENT_DP) + 0.0001).abs() < 1e-12);

        let rounded = Decimal::from_f64(round_dp(1414.213_562_373_095, VALUE_DP)).unwrap();
        assert_eq!(rounded.round_dp(VALUE_DP), dec!(1414.21356237));
    }

    #[test]
    fn test_round_dp_passes_through_unrepresentable() {
        assert!(round_dp(f64::NAN, VALUE_DP).is_nan());
        assert_eq!(round_dp(f64::INFINITY, VALUE_DP), f64::INFINITY);
        assert_eq!(round_dp(1e30, VALUE_DP), 1e30);
    }
}
