use crate::error::DomainError;
use crate::metrics::impermanent_loss::evaluate;
use crate::value_objects::position_valuation::PositionValuation;
use crate::value_objects::price_range::PriceRange;
use serde::{Deserialize, Serialize};

/// Notional deposit, in quote-currency units, used when none is given.
pub const DEFAULT_DEPOSIT_VALUE: f64 = 1000.0;

fn default_deposit_value() -> f64 {
    DEFAULT_DEPOSIT_VALUE
}

/// Inputs for valuing one position at one price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionInputs {
    /// Price at which liquidity was deposited.
    pub deposit_price: f64,
    /// Price at which the position is valued. May be zero or outside the range.
    pub eval_price: f64,
    pub range: PriceRange,
    #[serde(default = "default_deposit_value")]
    pub deposit_value: f64,
}

impl PositionInputs {
    /// Creates inputs with the default deposit of [`DEFAULT_DEPOSIT_VALUE`].
    pub fn new(deposit_price: f64, eval_price: f64, range: PriceRange) -> Self {
        Self {
            deposit_price,
            eval_price,
            range,
            deposit_value: DEFAULT_DEPOSIT_VALUE,
        }
    }

    #[must_use]
    pub fn with_deposit_value(mut self, deposit_value: f64) -> Self {
        self.deposit_value = deposit_value;
        self
    }

    /// Same position valued at another price.
    #[must_use]
    pub fn at_price(mut self, eval_price: f64) -> Self {
        self.eval_price = eval_price;
        self
    }

    /// Reports the first input that would make [`evaluate`] fall back to a
    /// zero valuation. A non-positive `eval_price` is not an error: it
    /// models a collapsed token0.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.deposit_price.is_finite() || self.deposit_price <= 0.0 {
            return Err(DomainError::InvalidPrice(self.deposit_price));
        }
        if !self.eval_price.is_finite() {
            return Err(DomainError::InvalidPrice(self.eval_price));
        }
        if !self.deposit_value.is_finite() {
            return Err(DomainError::InvalidDepositValue(self.deposit_value));
        }
        Ok(())
    }

    pub fn evaluate(&self) -> PositionValuation {
        evaluate(
            self.deposit_price,
            self.eval_price,
            self.range.lower(),
            self.range.upper(),
            self.deposit_value,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let range = PriceRange::new(100.0, 200.0).unwrap();
        let inputs = PositionInputs::new(150.0, 150.0, range);
        assert_eq!(inputs.deposit_value, DEFAULT_DEPOSIT_VALUE);

        let moved = inputs.with_deposit_value(5_000.0).at_price(140.0);
        assert_eq!(moved.deposit_value, 5_000.0);
        assert_eq!(moved.eval_price, 140.0);
        assert_eq!(moved.deposit_price, 150.0);
    }

    #[test]
    fn test_evaluate_matches_free_function() {
        let range = PriceRange::new(100.0, 200.0).unwrap();
        let inputs = PositionInputs::new(150.0, 140.0, range);
        assert_eq!(inputs.evaluate(), evaluate(150.0, 140.0, 100.0, 200.0, 1000.0));
    }

    #[test]
    fn test_validate_flags_zero_valuation_inputs() {
        let range = PriceRange::new(100.0, 200.0).unwrap();
        assert!(PositionInputs::new(150.0, 0.0, range).validate().is_ok());
        assert_eq!(
            PositionInputs::new(0.0, 150.0, range).validate(),
            Err(DomainError::InvalidPrice(0.0))
        );
        assert!(
            PositionInputs::new(150.0, 150.0, range)
                .with_deposit_value(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_deserialize_fills_default_deposit() {
        let json = r#"{"depositPrice":100.0,"evalPrice":110.0,"range":{"lower":70.0,"upper":130.0}}"#;
        let inputs: PositionInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.deposit_value, DEFAULT_DEPOSIT_VALUE);
        assert_eq!(inputs.range.lower(), 70.0);
    }
}
