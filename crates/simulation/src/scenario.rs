//! Calculator scenarios.
//!
//! A [`Scenario`] is one set of calculator inputs together with the token
//! labels shown next to the figures. Scenarios round-trip through a URL
//! query string so a link reproduces the exact chart someone was looking at.

use crate::curve::{CurveConfig, CurveSeries, sample};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uniswap_il_domain::DEFAULT_DEPOSIT_VALUE;
use uniswap_il_domain::metrics::impermanent_loss::evaluate;
use uniswap_il_domain::value_objects::position_valuation::PositionValuation;
use url::form_urlencoded;

/// Number of notches on the scenario-price slider.
pub const SLIDER_STEPS: u32 = 100;

const KEY_INITIAL: &str = "initial";
const KEY_MIN: &str = "min";
const KEY_MAX: &str = "max";
const KEY_CURRENT: &str = "current";
const KEY_DEPOSIT: &str = "vDeposit";
const KEY_TOKEN_A: &str = "tokenA";
const KEY_TOKEN_B: &str = "tokenB";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("query parameter `{key}` is not a number: {value:?}")]
    InvalidNumber { key: String, value: String },
}

/// Inputs of one calculator session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    /// Label of the base asset (token0).
    pub token_a: String,
    /// Label of the quote asset (token1).
    pub token_b: String,
    pub deposit_value: f64,
    /// Deposit price.
    pub initial_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Price the position is being looked at.
    pub current_price: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            token_a: "Token A".to_string(),
            token_b: "Token B".to_string(),
            deposit_value: DEFAULT_DEPOSIT_VALUE,
            initial_price: 100.0,
            min_price: 70.0,
            max_price: 130.0,
            current_price: 100.0,
        }
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ScenarioError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ScenarioError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

impl Scenario {
    /// Parses a shareable query string, e.g.
    /// `?initial=100&min=70&max=130&current=110&vDeposit=1000&tokenA=ETH&tokenB=USDC`.
    ///
    /// Missing keys keep their defaults and unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self, ScenarioError> {
        let query = query.trim().trim_start_matches('?');
        let mut scenario = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                KEY_INITIAL => scenario.initial_price = parse_number(&key, &value)?,
                KEY_MIN => scenario.min_price = parse_number(&key, &value)?,
                KEY_MAX => scenario.max_price = parse_number(&key, &value)?,
                KEY_CURRENT => scenario.current_price = parse_number(&key, &value)?,
                KEY_DEPOSIT => scenario.deposit_value = parse_number(&key, &value)?,
                KEY_TOKEN_A => scenario.token_a = value.into_owned(),
                KEY_TOKEN_B => scenario.token_b = value.into_owned(),
                other => debug!(key = other, "ignoring unknown scenario parameter"),
            }
        }
        Ok(scenario)
    }

    /// Encodes the scenario as a query string, without the leading `?`.
    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(KEY_INITIAL, &self.initial_price.to_string())
            .append_pair(KEY_MIN, &self.min_price.to_string())
            .append_pair(KEY_MAX, &self.max_price.to_string())
            .append_pair(KEY_CURRENT, &self.current_price.to_string())
            .append_pair(KEY_DEPOSIT, &self.deposit_value.to_string())
            .append_pair(KEY_TOKEN_A, &self.token_a)
            .append_pair(KEY_TOKEN_B, &self.token_b)
            .finish()
    }

    /// Snaps the scenario price back onto the deposit price, as the
    /// calculator does whenever the position inputs change.
    pub fn reset_current(&mut self) {
        self.current_price = self.initial_price;
    }

    /// The position valued at the scenario price.
    pub fn valuation(&self) -> PositionValuation {
        self.valuation_at(self.current_price)
    }

    pub fn valuation_at(&self, price: f64) -> PositionValuation {
        evaluate(
            self.initial_price,
            price,
            self.min_price,
            self.max_price,
            self.deposit_value,
        )
    }

    pub fn curve(&self, points: usize) -> CurveSeries {
        sample(
            self.initial_price,
            self.min_price,
            self.max_price,
            self.deposit_value,
            points,
        )
    }

    pub fn report(&self) -> ScenarioReport {
        let valuation = self.valuation();
        let initial = self.valuation_at(self.initial_price);
        ScenarioReport {
            token_a: self.token_a.clone(),
            token_b: self.token_b.clone(),
            deposit_value: self.deposit_value,
            current_price: self.current_price,
            initial_pool_value: initial.pool_value,
            difference: valuation.difference(),
            pnl_vs_initial: valuation.pnl_vs_deposit(self.deposit_value),
            pnl_vs_hold: valuation.pnl_vs_hold(),
            valuation,
        }
    }

    /// Log-scale bounds of the scenario-price slider, which spans the same
    /// prices as the chart.
    pub fn slider_bounds(&self) -> SliderBounds {
        let config = CurveConfig::default();
        let min_log = (self.min_price * config.lower_multiplier).ln();
        let max_log = (self.max_price * config.upper_multiplier).ln();
        SliderBounds {
            min_log,
            max_log,
            step: (max_log - min_log) / f64::from(SLIDER_STEPS),
        }
    }
}

/// Summary figures shown beside the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub token_a: String,
    pub token_b: String,
    pub deposit_value: f64,
    pub current_price: f64,
    pub valuation: PositionValuation,
    /// LP value at the deposit price.
    pub initial_pool_value: f64,
    /// `|hold_value - pool_value|`
    pub difference: f64,
    pub pnl_vs_initial: f64,
    pub pnl_vs_hold: f64,
}

impl ScenarioReport {
    /// e.g. `"42.10% ETH / 57.90% USDC"`
    pub fn split_label(&self) -> String {
        format!(
            "{:.2}% {} / {:.2}% {}",
            self.valuation.percent_a, self.token_a, self.valuation.percent_b, self.token_b
        )
    }
}

/// A slider moving in `ln(price)` so equal travel means equal ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderBounds {
    pub min_log: f64,
    pub max_log: f64,
    pub step: f64,
}

impl SliderBounds {
    /// Price at a slider position, clamped to the slider's span.
    pub fn price_at(&self, log_price: f64) -> f64 {
        log_price.clamp(self.min_log, self.max_log).exp()
    }

    /// Slider position for a price. Non-positive prices pin to the left end.
    pub fn position_of(&self, price: f64) -> f64 {
        if price <= 0.0 || price.is_nan() {
            return self.min_log;
        }
        price.ln().clamp(self.min_log, self.max_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let scenario = Scenario::default();
        assert_eq!(scenario.token_a, "Token A");
        assert_eq!(scenario.deposit_value, 1000.0);
        assert_eq!(scenario.initial_price, 100.0);
        assert_eq!(scenario.min_price, 70.0);
        assert_eq!(scenario.max_price, 130.0);
        assert_eq!(scenario.current_price, 100.0);
    }

    #[test]
    fn test_from_query() {
        let scenario = Scenario::from_query(
            "?initial=2500&min=2000&max=3200&current=2800&vDeposit=5000&tokenA=ETH&tokenB=USD+Coin",
        )
        .unwrap();
        assert_eq!(scenario.initial_price, 2500.0);
        assert_eq!(scenario.min_price, 2000.0);
        assert_eq!(scenario.max_price, 3200.0);
        assert_eq!(scenario.current_price, 2800.0);
        assert_eq!(scenario.deposit_value, 5000.0);
        assert_eq!(scenario.token_a, "ETH");
        assert_eq!(scenario.token_b, "USD Coin");
    }

    #[test]
    fn test_from_query_keeps_defaults_and_ignores_unknown_keys() {
        let scenario = Scenario::from_query("min=50&utm_source=newsletter").unwrap();
        assert_eq!(scenario.min_price, 50.0);
        assert_eq!(scenario.max_price, 130.0);
        assert_eq!(scenario.token_b, "Token B");

        assert_eq!(Scenario::from_query("").unwrap(), Scenario::default());
    }

    #[test]
    fn test_from_query_rejects_bad_numbers() {
        let err = Scenario::from_query("initial=abc").unwrap_err();
        assert_eq!(
            err,
            ScenarioError::InvalidNumber {
                key: "initial".to_string(),
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_query_round_trip() {
        let scenario = Scenario {
            token_a: "W ETH".to_string(),
            token_b: "USDC&co".to_string(),
            deposit_value: 1234.5,
            initial_price: 0.25,
            min_price: 0.1,
            max_price: 0.5,
            current_price: 0.3,
        };
        let query = scenario.to_query();
        assert_eq!(
            query,
            "initial=0.25&min=0.1&max=0.5&current=0.3&vDeposit=1234.5&tokenA=W+ETH&tokenB=USDC%26co"
        );
        assert_eq!(Scenario::from_query(&query).unwrap(), scenario);
    }

    #[test]
    fn test_report_at_deposit_price() {
        let report = Scenario::default().report();
        assert!(report.valuation.il_percent.abs() < 1e-6);
        assert!((report.initial_pool_value - 1000.0).abs() < 1e-6);
        assert!(report.difference < 1e-6);
        assert!(report.pnl_vs_initial.abs() < 1e-6);
        assert!(report.pnl_vs_hold.abs() < 1e-6);
    }

    #[test]
    fn test_report_after_move() {
        let scenario = Scenario {
            current_price: 110.0,
            ..Scenario::default()
        };
        let report = scenario.report();
        let valuation = report.valuation;
        assert!((valuation.il_percent - 0.797_888_12).abs() < 1e-6);
        assert!((report.pnl_vs_hold + report.difference).abs() < 1e-9);
        assert!((report.pnl_vs_initial - (valuation.pool_value - 1000.0)).abs() < 1e-9);
        assert!(report.pnl_vs_initial > 0.0);
        assert!(report.split_label().ends_with("% Token B"));
    }

    #[test]
    fn test_reset_current() {
        let mut scenario = Scenario {
            current_price: 120.0,
            initial_price: 90.0,
            ..Scenario::default()
        };
        scenario.reset_current();
        assert_eq!(scenario.current_price, 90.0);
    }

    #[test]
    fn test_slider_bounds() {
        let slider = Scenario::default().slider_bounds();
        assert!((slider.min_log - 35f64.ln()).abs() < 1e-12);
        assert!((slider.max_log - 260f64.ln()).abs() < 1e-12);
        assert!((slider.step * 100.0 - (slider.max_log - slider.min_log)).abs() < 1e-12);

        assert!((slider.price_at(slider.position_of(100.0)) - 100.0).abs() < 1e-9);
        assert!((slider.price_at(100.0) - 260.0).abs() < 1e-9);
        assert_eq!(slider.position_of(0.0), slider.min_log);
    }

    #[test]
    fn test_curve_uses_scenario_inputs() {
        let scenario = Scenario::default();
        let series = scenario.curve(40);
        assert!(series.iter().any(|p| p.price == scenario.min_price));
        assert!(series.iter().any(|p| p.price == scenario.max_price));
    }
}
