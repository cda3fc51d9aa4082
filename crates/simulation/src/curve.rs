//! Impermanent loss curve sampling.
//!
//! A curve is a dense series of valuations across a log-spaced sweep of
//! prices, from half the lower bound to twice the upper bound, plus a
//! zero-price anchor and both range bounds. It is what the chart draws:
//! IL %, the per-token value split and P&L against two baselines.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uniswap_il_domain::PriceRange;
use uniswap_il_domain::math::rounding::{VALUE_DP, round_dp};
use uniswap_il_domain::metrics::impermanent_loss::evaluate;
use uniswap_il_domain::value_objects::position_valuation::PositionValuation;

/// Sweep density for full charts.
pub const DEFAULT_CURVE_POINTS: usize = 1000;

/// Sweep density for quick previews.
pub const PREVIEW_CURVE_POINTS: usize = 80;

/// Lowest price the sweep starts from.
pub const MIN_START_PRICE: f64 = 1e-8;

/// Two prices closer than this are the same chart point.
pub const BOUNDARY_TOLERANCE: f64 = 1e-8;

/// Sweep settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveConfig {
    /// Number of log steps; the sweep evaluates `points + 1` prices.
    pub points: usize,
    /// Sweep start as a multiple of the lower bound.
    pub lower_multiplier: f64,
    /// Sweep end as a multiple of the upper bound.
    pub upper_multiplier: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_CURVE_POINTS,
            lower_multiplier: 0.5,
            upper_multiplier: 2.0,
        }
    }
}

impl CurveConfig {
    #[must_use]
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// `(start, end)` of the price sweep for `range`.
    pub fn sweep_bounds(&self, range: &PriceRange) -> (f64, f64) {
        let start = (range.lower() * self.lower_multiplier).max(MIN_START_PRICE);
        let end = range.upper() * self.upper_multiplier;
        (start, end)
    }
}

/// One sampled price on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub price: f64,
    pub il_percent: f64,
    pub value_a: f64,
    pub value_b: f64,
    pub percent_a: f64,
    pub percent_b: f64,
    pub pool_value: f64,
    /// Deposit-time token split marked to `price`.
    pub hold_value: f64,
    /// A never-rebalanced 50/50 split of the deposit marked to `price`.
    /// Drawn as the dashed reference line.
    pub linear_hold_value: f64,
    /// `pool_value - deposit_value`
    pub pnl_from_initial: f64,
    /// `pool_value - linear_hold_value`
    pub pnl_from_hold: f64,
}

impl CurvePoint {
    fn new(price: f64, valuation: &PositionValuation, deposit_value: f64, linear_hold: f64) -> Self {
        Self {
            price,
            il_percent: valuation.il_percent,
            value_a: valuation.value_a,
            value_b: valuation.value_b,
            percent_a: valuation.percent_a,
            percent_b: valuation.percent_b,
            pool_value: valuation.pool_value,
            hold_value: valuation.hold_value,
            linear_hold_value: round_dp(linear_hold, VALUE_DP),
            pnl_from_initial: round_dp(valuation.pool_value - deposit_value, VALUE_DP),
            pnl_from_hold: round_dp(valuation.pool_value - linear_hold, VALUE_DP),
        }
    }
}

/// Curve points sorted ascending by price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveSeries {
    points: Vec<CurvePoint>,
}

impl CurveSeries {
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CurvePoint> {
        self.points.iter()
    }

    pub fn into_inner(self) -> Vec<CurvePoint> {
        self.points
    }

    /// The point sampled at `price`, within [`BOUNDARY_TOLERANCE`].
    pub fn point_at(&self, price: f64) -> Option<&CurvePoint> {
        self.points
            .iter()
            .find(|p| (p.price - price).abs() < BOUNDARY_TOLERANCE)
    }

    /// Point with the largest impermanent loss, used to scale the chart axis.
    pub fn max_il(&self) -> Option<&CurvePoint> {
        self.points
            .iter()
            .max_by(|a, b| a.il_percent.total_cmp(&b.il_percent))
    }
}

impl IntoIterator for CurveSeries {
    type Item = CurvePoint;
    type IntoIter = std::vec::IntoIter<CurvePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a CurveSeries {
    type Item = &'a CurvePoint;
    type IntoIter = std::slice::Iter<'a, CurvePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Value at `price` of an even split of the deposit, held without
/// rebalancing.
pub fn linear_hold_value(deposit_price: f64, deposit_value: f64, price: f64) -> f64 {
    let half = deposit_value / 2.0;
    half / deposit_price * price + half
}

/// Moves the sweep price nearest to `bound` onto it, if one lies within
/// [`BOUNDARY_TOLERANCE`]. Only that one price moves; `taken` is a slot
/// already claimed by the other bound. Returns the slot used.
fn snap_to_bound(prices: &mut [f64], bound: f64, taken: Option<usize>) -> Option<usize> {
    let (slot, distance) = prices
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != taken)
        .map(|(i, p)| (i, (p - bound).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))?;
    if distance < BOUNDARY_TOLERANCE {
        prices[slot] = bound;
        Some(slot)
    } else {
        None
    }
}

/// Samples the IL curve with the default sweep and `num_points` log steps.
///
/// See [`sample_with_config`].
pub fn sample(
    deposit_price: f64,
    lower: f64,
    upper: f64,
    deposit_value: f64,
    num_points: usize,
) -> CurveSeries {
    let config = CurveConfig::default().with_points(num_points);
    sample_with_config(deposit_price, lower, upper, deposit_value, &config)
}

/// Samples the IL curve for a position.
///
/// The series starts with a zero-price anchor, then `config.points + 1`
/// log-spaced prices across the sweep, and always contains `lower` and
/// `upper` exactly. Inputs that cannot describe a position produce an
/// empty series. A zero `points` is treated as one step.
pub fn sample_with_config(
    deposit_price: f64,
    lower: f64,
    upper: f64,
    deposit_value: f64,
    config: &CurveConfig,
) -> CurveSeries {
    if !deposit_price.is_finite() || deposit_price <= 0.0 || !deposit_value.is_finite() {
        warn!(deposit_price, deposit_value, "cannot sample curve for invalid deposit");
        return CurveSeries::default();
    }
    let range = match PriceRange::new(lower, upper) {
        Ok(range) => range,
        Err(e) => {
            warn!(error = %e, "cannot sample curve for invalid range");
            return CurveSeries::default();
        }
    };

    let point_at = |price: f64| {
        let valuation = evaluate(deposit_price, price, lower, upper, deposit_value);
        let linear_hold = linear_hold_value(deposit_price, deposit_value, price);
        CurvePoint::new(price, &valuation, deposit_value, linear_hold)
    };

    let steps = config.points.max(1);
    let (start, end) = config.sweep_bounds(&range);

    let mut prices: Vec<f64> = if start.is_finite() && end.is_finite() && end > start {
        let ratio = end / start;
        (0..=steps)
            .map(|i| start * ratio.powf(i as f64 / steps as f64))
            .collect()
    } else {
        Vec::new()
    };

    let lower_slot = snap_to_bound(&mut prices, lower, None);
    let upper_slot = snap_to_bound(&mut prices, upper, lower_slot);
    if lower_slot.is_none() {
        prices.push(lower);
    }
    if upper_slot.is_none() {
        prices.push(upper);
    }

    let mut points = Vec::with_capacity(prices.len() + 1);
    points.push(point_at(0.0));
    points.extend(prices.into_iter().map(point_at));

    points.sort_by(|a, b| a.price.total_cmp(&b.price));
    points.dedup_by(|next, prev| next.price == prev.price);

    debug!(
        points = points.len(),
        start, end, "sampled impermanent loss curve"
    );
    CurveSeries { points }
}
