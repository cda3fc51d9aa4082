use thiserror::Error;

/// Errors raised when constructing domain value objects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A price that must be positive and finite was not.
    #[error("invalid price {0}: must be a positive finite number")]
    InvalidPrice(f64),
    /// The range bounds are not ordered as `0 < lower < upper`.
    #[error("invalid range [{lower}, {upper}]: expected 0 < lower < upper")]
    InvalidRange { lower: f64, upper: f64 },
    /// The deposited value is not a finite number.
    #[error("invalid deposit value {0}")]
    InvalidDepositValue(f64),
}
