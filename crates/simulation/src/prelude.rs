//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use uniswap_il_simulation::prelude::*;
//! ```

// Curve sampling
pub use crate::curve::{
    CurveConfig, CurvePoint, CurveSeries, DEFAULT_CURVE_POINTS, PREVIEW_CURVE_POINTS, sample,
    sample_with_config,
};

// Calculator scenarios
pub use crate::scenario::{Scenario, ScenarioError, ScenarioReport, SliderBounds};

// Domain types most callers need alongside the above
pub use uniswap_il_domain::{
    DEFAULT_DEPOSIT_VALUE, PositionInputs, PositionValuation, PriceRange, evaluate,
};
