//! The three collection proposals and their present value
//!
//! - **Lump sum**: a single discounted payment at month 0
//! - **Inflation-indexed**: `periods` installments of `principal / periods`,
//!   each scaled by cumulative monthly inflation up to its own month
//! - **FX-indexed**: the principal converted to foreign currency once, paid
//!   in equal foreign-currency installments at the projected exchange rate

use serde::{Deserialize, Serialize};
use std::fmt;

use super::discount::DiscountRate;
use super::schedule::{CashFlowSchedule, EvaluationResult, ScheduleRow};
use crate::error::{EngineError, EngineResult};

/// Longest installment schedule the engine builds (50 years of months)
pub const MAX_PERIODS: u32 = 600;

/// Identifier of a collection option, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionId {
    LumpSum,
    InflationIndexed,
    FxIndexed,
}

impl OptionId {
    pub const ALL: [OptionId; 3] = [
        OptionId::LumpSum,
        OptionId::InflationIndexed,
        OptionId::FxIndexed,
    ];

    /// 1-based option number
    pub fn number(self) -> u8 {
        match self {
            OptionId::LumpSum => 1,
            OptionId::InflationIndexed => 2,
            OptionId::FxIndexed => 3,
        }
    }

    /// Stable key used in JSON and CSV file names
    pub fn key(self) -> &'static str {
        match self {
            OptionId::LumpSum => "lump_sum",
            OptionId::InflationIndexed => "inflation_indexed",
            OptionId::FxIndexed => "fx_indexed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            OptionId::LumpSum => "Option 1: Cash payment",
            OptionId::InflationIndexed => "Option 2: Installments + inflation",
            OptionId::FxIndexed => "Option 3: 'Dollar' installments",
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Single payment of `principal * (1 - discount_pct/100)` at month 0.
///
/// A discount above 100% produces a negative payment; that is left as is.
pub fn evaluate_lump_sum(principal: f64, discount_pct: f64) -> EngineResult<EvaluationResult> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative("discount_pct", discount_pct)?;

    let payment = principal * (1.0 - discount_pct / 100.0);

    let mut schedule = CashFlowSchedule::with_capacity(1);
    schedule.push(ScheduleRow {
        period: 0,
        projected_exchange_rate: None,
        nominal_cash_flow: payment,
        present_value: payment,
    });

    Ok(EvaluationResult::from_schedule(schedule))
}

/// Installments indexed by cumulative inflation.
///
/// Month `m` pays `base * (1 + i)^m`, where `base = principal / periods` is
/// fixed for the whole schedule. The factor always applies to the base, not
/// to the previous month's adjusted installment.
pub fn evaluate_inflation_indexed(
    principal: f64,
    periods: u32,
    monthly_inflation_pct: f64,
    monthly_discount_rate: f64,
) -> EngineResult<EvaluationResult> {
    ensure_non_negative("principal", principal)?;
    ensure_periods(periods)?;
    ensure_non_negative("monthly_inflation_pct", monthly_inflation_pct)?;
    let discount = DiscountRate::from_monthly_rate(monthly_discount_rate)?;

    let base_installment = principal / periods as f64;
    let monthly_inflation = monthly_inflation_pct / 100.0;

    let mut schedule = CashFlowSchedule::with_capacity(periods as usize);
    for month in 1..=periods {
        let adjustment_factor = (1.0 + monthly_inflation).powi(month as i32);
        let adjusted_installment = base_installment * adjustment_factor;

        schedule.push(ScheduleRow {
            period: month,
            projected_exchange_rate: None,
            nominal_cash_flow: adjusted_installment,
            present_value: discount.present_value(adjusted_installment, month),
        });
    }

    Ok(EvaluationResult::from_schedule(schedule))
}

/// Installments fixed in foreign currency, collected at the projected rate.
///
/// The principal is converted at `initial_fx_rate` once. Month `m` collects
/// `installment_fx * initial_fx_rate * (1 + d)^m` in local currency.
pub fn evaluate_fx_indexed(
    principal: f64,
    periods: u32,
    initial_fx_rate: f64,
    monthly_devaluation_pct: f64,
    monthly_discount_rate: f64,
) -> EngineResult<EvaluationResult> {
    ensure_non_negative("principal", principal)?;
    ensure_periods(periods)?;
    if !initial_fx_rate.is_finite() || initial_fx_rate <= 0.0 {
        return Err(EngineError::invalid_input(
            "initial_fx_rate",
            format!("must be positive and finite, got {}", initial_fx_rate),
        ));
    }
    ensure_non_negative("monthly_devaluation_pct", monthly_devaluation_pct)?;
    let discount = DiscountRate::from_monthly_rate(monthly_discount_rate)?;

    let principal_fx = principal / initial_fx_rate;
    let installment_fx = principal_fx / periods as f64;
    let monthly_devaluation = monthly_devaluation_pct / 100.0;

    let mut schedule = CashFlowSchedule::with_capacity(periods as usize);
    for month in 1..=periods {
        let projected_fx_rate = initial_fx_rate * (1.0 + monthly_devaluation).powi(month as i32);
        let local_installment = installment_fx * projected_fx_rate;

        schedule.push(ScheduleRow {
            period: month,
            projected_exchange_rate: Some(projected_fx_rate),
            nominal_cash_flow: local_installment,
            present_value: discount.present_value(local_installment, month),
        });
    }

    Ok(EvaluationResult::from_schedule(schedule))
}

fn ensure_non_negative(field: &'static str, value: f64) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(EngineError::invalid_input(
            field,
            format!("must be finite, got {}", value),
        ));
    }
    if value < 0.0 {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(())
}

fn ensure_periods(periods: u32) -> EngineResult<()> {
    if periods < 1 {
        return Err(EngineError::invalid_input("periods", "must be at least 1"));
    }
    if periods > MAX_PERIODS {
        return Err(EngineError::invalid_input(
            "periods",
            format!("must be at most {}, got {}", MAX_PERIODS, periods),
        ));
    }
    Ok(())
}
