//! Token amounts and liquidity for a concentrated position.
//!
//! All functions take square-root prices and assume positive, finite
//! inputs; callers validate before reaching here.

use crate::enums::RangePosition;
use crate::value_objects::price_range::PriceRange;

fn ordered(sqrt_price_a: f64, sqrt_price_b: f64) -> (f64, f64) {
    if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    }
}

/// Amount of token0 (x) held by liquidity `L` across a price interval.
/// delta_x = L * (1/sqrt(P_a) - 1/sqrt(P_b))
pub fn get_amount0_delta(liquidity: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    liquidity * (1.0 / lower - 1.0 / upper)
}

/// Amount of token1 (y) held by liquidity `L` across a price interval.
/// delta_y = L * (sqrt(P_b) - sqrt(P_a))
pub fn get_amount1_delta(liquidity: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    liquidity * (upper - lower)
}

/// L = amount0 / (1/sqrt(P_a) - 1/sqrt(P_b))
pub fn get_liquidity_for_amount0(amount0: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    amount0 / (1.0 / lower - 1.0 / upper)
}

/// L = amount1 / (sqrt(P_b) - sqrt(P_a))
pub fn get_liquidity_for_amount1(amount1: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    amount1 / (upper - lower)
}

/// Liquidity whose two legs are worth `value` in total at an in-range price.
///
/// value = L * (P * (1/sqrt(P) - 1/sqrt(P_upper)) + (sqrt(P) - sqrt(P_lower)))
pub fn get_liquidity_for_value(value: f64, price: f64, range: &PriceRange) -> f64 {
    let sqrt_price = price.sqrt();
    let (sqrt_lower, sqrt_upper) = range.sqrt_bounds();
    let per_unit = price * (1.0 / sqrt_price - 1.0 / sqrt_upper) + (sqrt_price - sqrt_lower);
    value / per_unit
}

/// Token balances `(amount0, amount1)` held by liquidity `L` at `price`.
///
/// Below the range the position is all token0, above it all token1, and
/// in between it holds the two legs on either side of the price.
pub fn get_amounts_at_price(liquidity: f64, price: f64, range: &PriceRange) -> (f64, f64) {
    let (sqrt_lower, sqrt_upper) = range.sqrt_bounds();
    match range.locate(price) {
        RangePosition::Below => (get_amount0_delta(liquidity, sqrt_lower, sqrt_upper), 0.0),
        RangePosition::Above => (0.0, get_amount1_delta(liquidity, sqrt_lower, sqrt_upper)),
        RangePosition::InRange => {
            let sqrt_price = price.sqrt();
            (
                get_amount0_delta(liquidity, sqrt_price, sqrt_upper),
                get_amount1_delta(liquidity, sqrt_lower, sqrt_price),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_deltas() {
        // Liquidity 1000, price 1 -> 4 (sqrt 1 -> 2)
        // delta_y = 1000 * (2 - 1) = 1000
        // delta_x = 1000 * (1/1 - 1/2) = 500
        assert_eq!(get_amount1_delta(1000.0, 1.0, 2.0), 1000.0);
        assert_eq!(get_amount0_delta(1000.0, 1.0, 2.0), 500.0);
        // argument order does not matter
        assert_eq!(get_amount0_delta(1000.0, 2.0, 1.0), 500.0);
    }

    #[test]
    fn test_get_liquidity() {
        assert_eq!(get_liquidity_for_amount0(500.0, 1.0, 2.0), 1000.0);
        assert_eq!(get_liquidity_for_amount1(1000.0, 1.0, 2.0), 1000.0);
    }

    #[test]
    fn test_liquidity_for_value_prices_both_legs() {
        let range = PriceRange::new(70.0, 130.0).unwrap();
        let liquidity = get_liquidity_for_value(1000.0, 100.0, &range);
        let (x, y) = get_amounts_at_price(liquidity, 100.0, &range);
        assert!((x * 100.0 + y - 1000.0).abs() < 1e-9);
        assert!((liquidity - 349.305_985_051_705).abs() < 1e-6);
    }

    #[test]
    fn test_amounts_clamp_at_edges() {
        let range = PriceRange::new(100.0, 200.0).unwrap();
        let liquidity = 250.0;

        let (x_low, y_low) = get_amounts_at_price(liquidity, 50.0, &range);
        let (x_edge, y_edge) = get_amounts_at_price(liquidity, 100.0, &range);
        assert_eq!((x_low, y_low), (x_edge, y_edge));
        assert_eq!(y_low, 0.0);

        let (x_high, y_high) = get_amounts_at_price(liquidity, 400.0, &range);
        assert_eq!(x_high, 0.0);
        assert!((y_high - liquidity * (200f64.sqrt() - 10.0)).abs() < 1e-9);

        // approaching the lower edge from inside converges on the clamped value
        let (x_in, _) = get_amounts_at_price(liquidity, 100.000_001, &range);
        assert!((x_in - x_edge).abs() < 1e-6);
    }
}
