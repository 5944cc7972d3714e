//! Error types for the collection options evaluator
//!
//! The engine only ever fails on violated preconditions. The scenario layer
//! adds the UI bounds and file loading on top of that.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the NPV engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A precondition of an engine operation was violated
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        /// Name of the offending argument
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

impl EngineError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised while building or evaluating a scenario
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// An input is outside the range the calculator accepts
    #[error("{field} = {value} is outside the accepted range [{min}, {max}]")]
    OutOfBounds {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Failed to read scenario file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
