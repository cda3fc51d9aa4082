use serde::{Deserialize, Serialize};

/// Where a price sits relative to a position's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangePosition {
    /// At or below the lower bound: the position is entirely token0.
    Below,
    /// Strictly inside the range: the position holds both tokens.
    InRange,
    /// At or above the upper bound: the position is entirely token1.
    Above,
}

/// Liquidity shape of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionKind {
    /// Spans effectively every price and behaves like an x*y=k pool.
    FullRange,
    /// Active only between its range bounds.
    Concentrated,
}
