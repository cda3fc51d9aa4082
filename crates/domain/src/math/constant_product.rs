//! Constant-product (x * y = k) helpers used for full-range positions.

/// Liquidity of a constant-product position: `sqrt(x * y)`.
pub fn calculate_k(amount0: f64, amount1: f64) -> f64 {
    (amount0 * amount1).sqrt()
}

/// Reserves `(x, y)` of a constant-product position with liquidity `k`
/// at a given square-root price: `x = k / sqrt(P)`, `y = k * sqrt(P)`.
pub fn reserves_at_sqrt_price(k: f64, sqrt_price: f64) -> (f64, f64) {
    (k / sqrt_price, k * sqrt_price)
}

/// Splits `value` evenly between the two tokens at `price`.
pub fn split_evenly(value: f64, price: f64) -> (f64, f64) {
    let half = value / 2.0;
    (half / price, half)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_k() {
        assert_eq!(calculate_k(5.0, 500.0), 50.0);
    }

    #[test]
    fn test_reserves_keep_invariant() {
        let k = 50.0;
        let (x, y) = reserves_at_sqrt_price(k, 200f64.sqrt());
        assert!((x * y - k * k).abs() < 1e-9);
        // y / x is the price
        assert!((y / x - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_evenly() {
        assert_eq!(split_evenly(1000.0, 100.0), (5.0, 500.0));
    }
}
