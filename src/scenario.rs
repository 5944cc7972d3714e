//! Scenario inputs and the full three-way comparison
//!
//! A scenario is the handful of scalars the user controls: the credit, the
//! cash discount offered, the starting exchange rate and the macro
//! assumptions. `evaluate` checks them against the calculator's accepted
//! ranges and runs every option through the engine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::{
    evaluate_fx_indexed, evaluate_inflation_indexed, evaluate_lump_sum, monthly_discount_rate,
    recommend, EvaluationResult, OptionId,
};
use crate::error::ScenarioError;

/// Installment count used by the calculator
pub const DEFAULT_PERIODS: u32 = 12;

/// Accepted ranges for each input, inclusive
pub mod bounds {
    pub const PRINCIPAL: (f64, f64) = (1_000.0, f64::INFINITY);
    pub const PERIODS: (u32, u32) = (1, super::DEFAULT_PERIODS);
    pub const CONTADO_DISCOUNT_PCT: (f64, f64) = (0.0, 25.0);
    pub const INITIAL_FX_RATE: (f64, f64) = (1.0, f64::INFINITY);
    pub const ANNUAL_DISCOUNT_RATE_PCT: (f64, f64) = (0.0, 300.0);
    pub const MONTHLY_INFLATION_PCT: (f64, f64) = (0.0, 30.0);
    pub const MONTHLY_DEVALUATION_PCT: (f64, f64) = (0.0, 30.0);
}

/// Inputs for one comparison. Missing JSON fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    /// Nominal credit amount, local currency
    #[serde(default = "default_principal")]
    pub principal: f64,

    /// Number of monthly installments for options 2 and 3
    #[serde(default = "default_periods")]
    pub periods: u32,

    /// Option 1: discount for paying cash (%)
    #[serde(default = "default_contado_discount_pct")]
    pub contado_discount_pct: f64,

    /// Option 3: initial exchange rate (local per foreign unit)
    #[serde(default = "default_initial_fx_rate")]
    pub initial_fx_rate: f64,

    /// Creditor's annual opportunity cost (%)
    #[serde(default = "default_annual_discount_rate_pct")]
    pub annual_discount_rate_pct: f64,

    /// Option 2: projected average monthly inflation (%)
    #[serde(default = "default_monthly_inflation_pct")]
    pub monthly_inflation_pct: f64,

    /// Option 3: projected average monthly devaluation (%)
    #[serde(default = "default_monthly_devaluation_pct")]
    pub monthly_devaluation_pct: f64,
}

fn default_principal() -> f64 { 1_000_000.0 }
fn default_periods() -> u32 { DEFAULT_PERIODS }
fn default_contado_discount_pct() -> f64 { 7.0 }
fn default_initial_fx_rate() -> f64 { 950.0 }
fn default_annual_discount_rate_pct() -> f64 { 120.0 }
fn default_monthly_inflation_pct() -> f64 { 9.0 }
fn default_monthly_devaluation_pct() -> f64 { 5.0 }

impl Default for ScenarioInputs {
    fn default() -> Self {
        Self {
            principal: default_principal(),
            periods: default_periods(),
            contado_discount_pct: default_contado_discount_pct(),
            initial_fx_rate: default_initial_fx_rate(),
            annual_discount_rate_pct: default_annual_discount_rate_pct(),
            monthly_inflation_pct: default_monthly_inflation_pct(),
            monthly_devaluation_pct: default_monthly_devaluation_pct(),
        }
    }
}

impl ScenarioInputs {
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path(path: &Path) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Check every input against its accepted range
    pub fn validate(&self) -> Result<(), ScenarioError> {
        check("principal", self.principal, bounds::PRINCIPAL)?;
        check(
            "periods",
            self.periods as f64,
            (bounds::PERIODS.0 as f64, bounds::PERIODS.1 as f64),
        )?;
        check("contado_discount_pct", self.contado_discount_pct, bounds::CONTADO_DISCOUNT_PCT)?;
        check("initial_fx_rate", self.initial_fx_rate, bounds::INITIAL_FX_RATE)?;
        check(
            "annual_discount_rate_pct",
            self.annual_discount_rate_pct,
            bounds::ANNUAL_DISCOUNT_RATE_PCT,
        )?;
        check("monthly_inflation_pct", self.monthly_inflation_pct, bounds::MONTHLY_INFLATION_PCT)?;
        check(
            "monthly_devaluation_pct",
            self.monthly_devaluation_pct,
            bounds::MONTHLY_DEVALUATION_PCT,
        )?;
        Ok(())
    }
}

fn check(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), ScenarioError> {
    // NaN fails both comparisons, so test for containment instead of exclusion
    if value >= min && value <= max && !value.is_infinite() {
        Ok(())
    } else {
        Err(ScenarioError::OutOfBounds {
            field,
            value,
            min,
            max,
        })
    }
}

/// Outcome of evaluating all three options for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub inputs: ScenarioInputs,
    /// Effective monthly discount rate shared by all options
    pub monthly_discount_rate: f64,
    pub lump_sum: EvaluationResult,
    pub inflation_indexed: EvaluationResult,
    pub fx_indexed: EvaluationResult,
    pub recommended: OptionId,
}

impl Comparison {
    pub fn result(&self, id: OptionId) -> &EvaluationResult {
        match id {
            OptionId::LumpSum => &self.lump_sum,
            OptionId::InflationIndexed => &self.inflation_indexed,
            OptionId::FxIndexed => &self.fx_indexed,
        }
    }

    pub fn recommended_result(&self) -> &EvaluationResult {
        self.result(self.recommended)
    }

    /// Options in declaration order (1, 2, 3)
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &EvaluationResult)> + '_ {
        OptionId::ALL.into_iter().map(move |id| (id, self.result(id)))
    }

    /// Options ordered by NPV, best first; equal NPVs keep declaration order
    pub fn ranked(&self) -> Vec<(OptionId, &EvaluationResult)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.net_present_value.total_cmp(&a.1.net_present_value));
        ranked
    }
}

/// Validate the inputs and compare the three options
pub fn evaluate(inputs: &ScenarioInputs) -> Result<Comparison, ScenarioError> {
    inputs.validate()?;

    let monthly_rate = monthly_discount_rate(inputs.annual_discount_rate_pct)?;
    log::debug!(
        "Monthly discount rate {:.6} from {:.2}% annual",
        monthly_rate,
        inputs.annual_discount_rate_pct
    );

    let lump_sum = evaluate_lump_sum(inputs.principal, inputs.contado_discount_pct)?;
    let inflation_indexed = evaluate_inflation_indexed(
        inputs.principal,
        inputs.periods,
        inputs.monthly_inflation_pct,
        monthly_rate,
    )?;
    let fx_indexed = evaluate_fx_indexed(
        inputs.principal,
        inputs.periods,
        inputs.initial_fx_rate,
        inputs.monthly_devaluation_pct,
        monthly_rate,
    )?;

    let recommended = recommend([
        (OptionId::LumpSum, &lump_sum),
        (OptionId::InflationIndexed, &inflation_indexed),
        (OptionId::FxIndexed, &fx_indexed),
    ])?;

    let comparison = Comparison {
        inputs: inputs.clone(),
        monthly_discount_rate: monthly_rate,
        lump_sum,
        inflation_indexed,
        fx_indexed,
        recommended,
    };

    log::info!(
        "Recommended {} with NPV {:.2}",
        recommended,
        comparison.recommended_result().net_present_value
    );

    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn with(change: impl FnOnce(&mut ScenarioInputs)) -> ScenarioInputs {
        let mut inputs = ScenarioInputs::default();
        change(&mut inputs);
        inputs
    }

    #[test]
    fn test_default_scenario() {
        let comparison = evaluate(&ScenarioInputs::default()).unwrap();

        assert_abs_diff_eq!(comparison.lump_sum.net_present_value, 930_000.0, epsilon = 1e-6);
        assert_relative_eq!(
            comparison.monthly_discount_rate,
            2.2_f64.powf(1.0 / 12.0) - 1.0,
            max_relative = 1e-12
        );
        assert_eq!(comparison.inflation_indexed.schedule.len(), 12);
        assert_eq!(comparison.fx_indexed.schedule.len(), 12);

        let best = comparison
            .iter()
            .map(|(_, r)| r.net_present_value)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(comparison.recommended_result().net_present_value, best);
    }

    #[test]
    fn test_default_scenario_recommends_inflation() {
        // 9% monthly inflation outruns both the 6.8% monthly discount and 5% devaluation
        let comparison = evaluate(&ScenarioInputs::default()).unwrap();
        assert_eq!(comparison.recommended, OptionId::InflationIndexed);
        assert!(comparison.inflation_indexed.net_present_value > 1_000_000.0);
    }

    #[test]
    fn test_lump_sum_wins_when_indexation_lags() {
        let inputs = ScenarioInputs {
            monthly_inflation_pct: 0.0,
            monthly_devaluation_pct: 0.0,
            ..Default::default()
        };
        let comparison = evaluate(&inputs).unwrap();
        assert_eq!(comparison.recommended, OptionId::LumpSum);
    }

    #[test]
    fn test_ranked_order() {
        let comparison = evaluate(&ScenarioInputs::default()).unwrap();
        let ranked = comparison.ranked();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].0, comparison.recommended);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].1.net_present_value >= w[1].1.net_present_value));
    }

    #[test]
    fn test_ranked_keeps_declaration_order_on_ties() {
        let inputs = ScenarioInputs {
            contado_discount_pct: 0.0,
            annual_discount_rate_pct: 0.0,
            monthly_inflation_pct: 0.0,
            monthly_devaluation_pct: 0.0,
            principal: 1_200_000.0,
            ..Default::default()
        };
        let comparison = evaluate(&inputs).unwrap();
        // Installments of 100,000 undiscounted sum back to the principal
        assert_relative_eq!(
            comparison.inflation_indexed.net_present_value,
            1_200_000.0,
            max_relative = 1e-12
        );
        assert_eq!(comparison.recommended, OptionId::LumpSum);
        assert_eq!(comparison.ranked()[0].0, OptionId::LumpSum);
    }

    #[test]
    fn test_out_of_bounds_inputs() {
        let cases = [
            with(|s| s.principal = 999.0),
            with(|s| s.periods = 0),
            with(|s| s.periods = 13),
            with(|s| s.contado_discount_pct = 25.5),
            with(|s| s.initial_fx_rate = 0.5),
            with(|s| s.annual_discount_rate_pct = 301.0),
            with(|s| s.monthly_inflation_pct = -0.1),
            with(|s| s.monthly_devaluation_pct = f64::NAN),
            with(|s| s.principal = f64::INFINITY),
        ];
        for inputs in cases {
            let err = evaluate(&inputs).unwrap_err();
            assert!(matches!(err, ScenarioError::OutOfBounds { .. }), "{:?}", inputs);
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let inputs = ScenarioInputs {
            principal: 1_000.0,
            periods: 1,
            contado_discount_pct: 25.0,
            initial_fx_rate: 1.0,
            annual_discount_rate_pct: 300.0,
            monthly_inflation_pct: 30.0,
            monthly_devaluation_pct: 30.0,
        };
        let comparison = evaluate(&inputs).unwrap();
        assert_eq!(comparison.fx_indexed.schedule.len(), 1);
    }

    #[test]
    fn test_json_fields_default() {
        let json = r#"{"principal": 2500000, "monthly_inflation_pct": 4.5}"#;
        let inputs = ScenarioInputs::from_json_str(json).unwrap();
        assert_eq!(inputs.principal, 2_500_000.0);
        assert_eq!(inputs.monthly_inflation_pct, 4.5);
        assert_eq!(inputs.periods, 12);
        assert_eq!(inputs.initial_fx_rate, 950.0);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            ScenarioInputs::from_json_str("{not json"),
            Err(ScenarioError::Parse(_))
        ));
        assert!(matches!(
            ScenarioInputs::from_json_path(Path::new("/nonexistent/scenario.json")),
            Err(ScenarioError::Io { .. })
        ));
    }
}
