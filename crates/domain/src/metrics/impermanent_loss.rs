use crate::enums::RangePosition;
use crate::math::concentrated_liquidity::{
    get_amounts_at_price, get_liquidity_for_amount0, get_liquidity_for_amount1,
    get_liquidity_for_value,
};
use crate::math::constant_product::{calculate_k, reserves_at_sqrt_price, split_evenly};
use crate::math::rounding::{PERCENT_DP, VALUE_DP, round_dp};
use crate::value_objects::position_valuation::PositionValuation;
use crate::value_objects::price_range::PriceRange;

/// Calculates Impermanent Loss for a constant product pool.
/// formula: 1 - 2 * sqrt(price_ratio) / (1 + price_ratio)
///
/// # Arguments
///
/// * `entry_price` - The price at which the position was opened (token1/token0)
/// * `current_price` - The current price (token1/token0)
///
/// # Returns
///
/// * `Option<f64>` - The loss as a positive percentage (e.g. 5.72 for a 2x move),
///   or `None` when either price is not a positive finite number
pub fn calculate_il_constant_product(entry_price: f64, current_price: f64) -> Option<f64> {
    let valid = |p: f64| p.is_finite() && p > 0.0;
    if !valid(entry_price) || !valid(current_price) {
        return None;
    }
    let ratio = current_price / entry_price;
    Some((1.0 - 2.0 * ratio.sqrt() / (1.0 + ratio)) * 100.0)
}

/// Token split and liquidity of a position at the moment of deposit.
#[derive(Debug, Clone, Copy)]
struct Deposit {
    amount0: f64,
    amount1: f64,
    liquidity: f64,
}

impl Deposit {
    fn at(price: f64, range: &PriceRange, value: f64) -> Self {
        if range.is_full_range() {
            let (amount0, amount1) = split_evenly(value, price);
            return Self {
                amount0,
                amount1,
                liquidity: calculate_k(amount0, amount1),
            };
        }

        let (sqrt_lower, sqrt_upper) = range.sqrt_bounds();
        match range.locate(price) {
            RangePosition::Below => {
                let amount0 = value / price;
                Self {
                    amount0,
                    amount1: 0.0,
                    liquidity: get_liquidity_for_amount0(amount0, sqrt_lower, sqrt_upper),
                }
            }
            RangePosition::Above => Self {
                amount0: 0.0,
                amount1: value,
                liquidity: get_liquidity_for_amount1(value, sqrt_lower, sqrt_upper),
            },
            RangePosition::InRange => {
                let liquidity = get_liquidity_for_value(value, price, range);
                let (amount0, amount1) = get_amounts_at_price(liquidity, price, range);
                Self {
                    amount0,
                    amount1,
                    liquidity,
                }
            }
        }
    }

    /// Balances the position holds once the price has moved to `price`.
    fn lp_amounts_at(&self, price: f64, range: &PriceRange) -> (f64, f64) {
        if range.is_full_range() {
            let k = calculate_k(self.amount0, self.amount1);
            reserves_at_sqrt_price(k, price.sqrt())
        } else {
            get_amounts_at_price(self.liquidity, price, range)
        }
    }
}

/// Values a Uniswap v3 range position at `eval_price` and compares it with
/// holding the tokens originally deposited at `deposit_price`.
///
/// The function is total. Non-finite inputs, a non-positive deposit price
/// or bounds, and an inverted range all yield [`PositionValuation::zero`].
/// A non-positive `eval_price` means token0 has collapsed: only the token1
/// half of an even deposit split keeps any value and the LP is worth zero.
///
/// # Arguments
///
/// * `deposit_price` - Price at which liquidity was added
/// * `eval_price` - Price at which the position is valued
/// * `lower` / `upper` - Range bounds
/// * `deposit_value` - Notional deposited, in quote-currency units
pub fn evaluate(
    deposit_price: f64,
    eval_price: f64,
    lower: f64,
    upper: f64,
    deposit_value: f64,
) -> PositionValuation {
    if !deposit_price.is_finite()
        || !eval_price.is_finite()
        || !deposit_value.is_finite()
        || deposit_price <= 0.0
    {
        return PositionValuation::zero(eval_price);
    }
    let Ok(range) = PriceRange::new(lower, upper) else {
        return PositionValuation::zero(eval_price);
    };

    if eval_price <= 0.0 {
        return collapsed(deposit_price, eval_price, deposit_value);
    }

    let deposit = Deposit::at(deposit_price, &range, deposit_value);
    let (lp_amount0, lp_amount1) = deposit.lp_amounts_at(eval_price, &range);

    let hold_value = deposit.amount0 * eval_price + deposit.amount1;
    let value_a = lp_amount0 * eval_price;
    let value_b = lp_amount1;
    let pool_value = value_a + value_b;
    // zero checks run on the reported values so a figure that rounds to
    // zero never carries a non-zero ratio
    let hold_rounded = round_dp(hold_value, VALUE_DP);
    let pool_rounded = round_dp(pool_value, VALUE_DP);
    let il_percent = if hold_rounded == 0.0 {
        0.0
    } else {
        (hold_value - pool_value) / hold_value * 100.0
    };
    let (percent_a, percent_b) = if pool_rounded == 0.0 {
        (0.0, 0.0)
    } else {
        split_percent(value_a, pool_value)
    };

    PositionValuation {
        il_percent: round_dp(il_percent, VALUE_DP),
        hold_value: hold_rounded,
        pool_value: pool_rounded,
        price: eval_price,
        amount0: round_dp(deposit.amount0, VALUE_DP),
        amount1: round_dp(deposit.amount1, VALUE_DP),
        lp_amount0: round_dp(lp_amount0, VALUE_DP),
        lp_amount1: round_dp(lp_amount1, VALUE_DP),
        value_a: round_dp(value_a, VALUE_DP),
        value_b: round_dp(value_b, VALUE_DP),
        percent_a,
        percent_b,
        liquidity: round_dp(deposit.liquidity, VALUE_DP),
    }
}

/// Token0 is worthless: hold keeps the token1 half, the LP keeps nothing.
fn collapsed(deposit_price: f64, eval_price: f64, deposit_value: f64) -> PositionValuation {
    let (amount0, amount1) = split_evenly(deposit_value, deposit_price);
    let hold_value = round_dp(amount1, VALUE_DP);
    PositionValuation {
        il_percent: if hold_value > 0.0 { 100.0 } else { 0.0 },
        hold_value,
        amount0: round_dp(amount0, VALUE_DP),
        amount1: round_dp(amount1, VALUE_DP),
        ..PositionValuation::zero(eval_price)
    }
}

/// Token0/token1 shares of a non-zero pool value. Token1 takes the
/// remainder so the pair always adds up to 100.
fn split_percent(value_a: f64, pool_value: f64) -> (f64, f64) {
    let percent_a = round_dp(value_a / pool_value * 100.0, PERCENT_DP);
    (percent_a, round_dp(100.0 - percent_a, PERCENT_DP))
}
