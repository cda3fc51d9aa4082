use serde::{Deserialize, Serialize};

/// Result of valuing an LP position at one price.
///
/// Amounts are in token units; values are in quote-currency units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionValuation {
    /// `(hold_value - pool_value) / hold_value * 100`. Positive means the
    /// LP position did worse than holding.
    pub il_percent: f64,
    /// Deposit-time token split marked to the evaluation price.
    pub hold_value: f64,
    /// LP position marked to the evaluation price.
    pub pool_value: f64,
    /// Echo of the evaluation price.
    pub price: f64,
    /// Token0 held at deposit.
    pub amount0: f64,
    /// Token1 held at deposit.
    pub amount1: f64,
    /// Token0 held by the position at the evaluation price.
    pub lp_amount0: f64,
    /// Token1 held by the position at the evaluation price.
    pub lp_amount1: f64,
    /// Token0 balance marked to the evaluation price.
    pub value_a: f64,
    /// Token1 balance, already in quote-currency units.
    pub value_b: f64,
    /// Share of `pool_value` held as token0, in percent.
    pub percent_a: f64,
    /// Share of `pool_value` held as token1, in percent.
    pub percent_b: f64,
    /// Constant liquidity `L` of the position.
    #[serde(rename = "L")]
    pub liquidity: f64,
}

impl PositionValuation {
    /// The all-zero valuation returned for invalid inputs.
    pub fn zero(price: f64) -> Self {
        Self {
            price,
            ..Self::default()
        }
    }

    /// Absolute gap between holding and providing liquidity.
    pub fn difference(&self) -> f64 {
        (self.hold_value - self.pool_value).abs()
    }

    /// LP value minus the value of holding the deposit-time tokens.
    pub fn pnl_vs_hold(&self) -> f64 {
        self.pool_value - self.hold_value
    }

    /// LP value minus the amount originally deposited.
    pub fn pnl_vs_deposit(&self, deposit_value: f64) -> f64 {
        self.pool_value - deposit_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_keeps_price() {
        let zero = PositionValuation::zero(42.0);
        assert_eq!(zero.price, 42.0);
        assert_eq!(zero.il_percent, 0.0);
        assert_eq!(zero.pool_value, 0.0);
        assert_eq!(zero.liquidity, 0.0);
    }

    #[test]
    fn test_serializes_chart_field_names() {
        let json = serde_json::to_value(PositionValuation::zero(1.0)).unwrap();
        assert!(json.get("ilPercent").is_some());
        assert!(json.get("lpAmount0").is_some());
        assert!(json.get("percentB").is_some());
        assert!(json.get("L").is_some());
        assert!(json.get("liquidity").is_none());
    }

    #[test]
    fn test_pnl_helpers() {
        let v = PositionValuation {
            hold_value: 1_100.0,
            pool_value: 1_050.0,
            ..PositionValuation::default()
        };
        assert_eq!(v.difference(), 50.0);
        assert_eq!(v.pnl_vs_hold(), -50.0);
        assert_eq!(v.pnl_vs_deposit(1_000.0), 50.0);
    }
}
