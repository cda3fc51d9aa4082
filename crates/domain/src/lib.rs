//! Domain model for Uniswap v3 impermanent loss.
//!
//! The crate holds the value types describing a single range position,
//! the concentrated-liquidity math and the position valuator that compares
//! an LP position against simply holding the deposited tokens.
//!
//! Every calculation here is pure: no I/O, no shared state, and invalid
//! input produces a zero valuation instead of an error so that a chart
//! being fed half-typed parameters never breaks.

pub mod enums;
pub mod error;
pub mod math;
pub mod metrics;
pub mod value_objects;

pub use error::DomainError;
pub use metrics::impermanent_loss::evaluate;
pub use value_objects::position_inputs::{DEFAULT_DEPOSIT_VALUE, PositionInputs};
pub use value_objects::position_valuation::PositionValuation;
pub use value_objects::price_range::PriceRange;
