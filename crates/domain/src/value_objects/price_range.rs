use crate::enums::{PositionKind, RangePosition};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether a price sits on a range edge.
pub const EDGE_TOLERANCE: f64 = 1e-10;

/// Lower bound at or below which a range counts as reaching zero.
pub const FULL_RANGE_LOWER: f64 = 1e-9;

/// Upper bound at or above which a range counts as reaching infinity.
pub const FULL_RANGE_UPPER: f64 = 1e9;

/// Returns true when the bounds describe a full-range position.
///
/// Either the bounds are effectively `(0, inf)` or both are non-finite.
pub fn is_full_range_bounds(lower: f64, upper: f64) -> bool {
    (lower <= FULL_RANGE_LOWER && upper >= FULL_RANGE_UPPER)
        || (!lower.is_finite() && !upper.is_finite())
}

/// Concentrated-liquidity bounds of a single position, `0 < lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    lower: f64,
    upper: f64,
}

#[derive(Deserialize)]
struct RawPriceRange {
    lower: f64,
    upper: f64,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = DomainError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        Self::new(raw.lower, raw.upper)
    }
}

impl PriceRange {
    /// Creates a range, rejecting non-finite, non-positive or inverted bounds.
    pub fn new(lower: f64, upper: f64) -> Result<Self, DomainError> {
        if !lower.is_finite() || !upper.is_finite() || lower <= 0.0 || upper <= 0.0 {
            return Err(DomainError::InvalidRange { lower, upper });
        }
        if lower >= upper {
            return Err(DomainError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// `(sqrt(lower), sqrt(upper))`
    pub fn sqrt_bounds(&self) -> (f64, f64) {
        (self.lower.sqrt(), self.upper.sqrt())
    }

    pub fn is_full_range(&self) -> bool {
        is_full_range_bounds(self.lower, self.upper)
    }

    pub fn kind(&self) -> PositionKind {
        if self.is_full_range() {
            PositionKind::FullRange
        } else {
            PositionKind::Concentrated
        }
    }

    /// Locates a price against the range, treating prices within
    /// [`EDGE_TOLERANCE`] of a bound as sitting on that bound.
    pub fn locate(&self, price: f64) -> RangePosition {
        if price <= self.lower + EDGE_TOLERANCE {
            RangePosition::Below
        } else if price >= self.upper - EDGE_TOLERANCE {
            RangePosition::Above
        } else {
            RangePosition::InRange
        }
    }
}
