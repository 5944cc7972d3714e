//! NPV engine for credit collection proposals
//!
//! Pure, deterministic functions: each option is evaluated on a monthly grid
//! and discounted at a single monthly rate derived from the creditor's annual
//! opportunity cost. Nothing here logs, caches or keeps state.
//!
//! # Example
//!
//! ```rust
//! use credit_collection::engine::{
//!     evaluate_fx_indexed, evaluate_inflation_indexed, evaluate_lump_sum,
//!     monthly_discount_rate, recommend, OptionId,
//! };
//!
//! let rate = monthly_discount_rate(120.0)?;
//! let lump_sum = evaluate_lump_sum(1_000_000.0, 7.0)?;
//! let inflation = evaluate_inflation_indexed(1_000_000.0, 12, 9.0, rate)?;
//! let fx = evaluate_fx_indexed(1_000_000.0, 12, 950.0, 5.0, rate)?;
//!
//! let best = recommend([
//!     (OptionId::LumpSum, &lump_sum),
//!     (OptionId::InflationIndexed, &inflation),
//!     (OptionId::FxIndexed, &fx),
//! ])?;
//! println!("{}: {:.2}", best, lump_sum.net_present_value);
//! # Ok::<(), credit_collection::EngineError>(())
//! ```

mod discount;
mod options;
mod recommend;
mod schedule;

pub use discount::{monthly_discount_rate, DiscountRate, MONTHS_PER_YEAR};
pub use options::{
    evaluate_fx_indexed, evaluate_inflation_indexed, evaluate_lump_sum, OptionId, MAX_PERIODS,
};
pub use recommend::recommend;
pub use schedule::{CashFlowSchedule, EvaluationResult, ScheduleRow};
