pub mod position_inputs;
pub mod position_valuation;
pub mod price_range;
