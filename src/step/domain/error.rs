//! Error types for step pattern compilation and step dispatch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures detected when a matched step is about to be dispatched.
///
/// These are reported through the host's failure channel and abandon only
/// the single step invocation; they never abort the surrounding test run.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDispatchError {
    /// A captured substring could not be converted to the requested type.
    #[error("could not convert '{value}' to {target_type} for step pattern '{pattern}'")]
    ConversionFailure {
        /// The offending captured substring.
        value: String,
        /// Name of the requested target type.
        target_type: String,
        /// Pattern of the step being dispatched.
        pattern: String,
    },

    /// Fewer substrings were captured than the registration form requires.
    #[error("{}", describe_arity(.pattern, *.expected, *.found))]
    ArityMismatch {
        /// Pattern of the step being dispatched.
        pattern: String,
        /// Minimum number of captured substrings required.
        expected: usize,
        /// Number of captured substrings actually found.
        found: usize,
    },
}

impl StepDispatchError {
    /// Returns the pattern of the step that failed to dispatch.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::ConversionFailure { pattern, .. } | Self::ArityMismatch { pattern, .. } => {
                pattern
            }
        }
    }
}

fn describe_arity(pattern: &str, expected: usize, found: usize) -> String {
    if expected == 1 && found == 0 {
        format!("expected single match not found for step pattern '{pattern}'")
    } else {
        format!("expected {expected} matches for step pattern '{pattern}' but found {found}")
    }
}

/// Error returned when a step pattern is not a valid regular expression.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid step pattern '{pattern}': {reason}")]
pub struct StepPatternError {
    /// The rejected pattern source.
    pub pattern: String,
    /// Compiler diagnostic.
    pub reason: String,
}

/// Error returned while parsing a Gherkin step keyword.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown step keyword: {0}")]
pub struct ParseStepKeywordError(pub String);
