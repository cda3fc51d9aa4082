//! Chart-facing layer over the impermanent loss model.
//!
//! [`curve`] sweeps the position valuator across a log-spaced price axis to
//! build the series a chart draws, and [`scenario`] models one calculator
//! session: its inputs, the shareable link that encodes them and the
//! summary figures shown next to the chart.

pub mod curve;
pub mod prelude;
pub mod scenario;
