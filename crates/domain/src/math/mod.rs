pub mod concentrated_liquidity;
pub mod constant_product;
pub mod rounding;
