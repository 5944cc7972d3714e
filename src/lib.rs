//! Credit Collection - NPV comparison of repayment proposals
//!
//! This library provides:
//! - Present value of a discounted cash payment
//! - Present value of inflation-indexed monthly installments
//! - Present value of installments indexed to a foreign exchange rate
//! - Recommendation of the proposal with the highest NPV
//! - Text, CSV and JSON rendering of a comparison

pub mod engine;
pub mod error;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use engine::{CashFlowSchedule, EvaluationResult, OptionId, ScheduleRow};
pub use error::{EngineError, EngineResult, ScenarioError};
pub use report::{ComparisonReport, TextReport};
pub use scenario::{evaluate, Comparison, ScenarioInputs};
