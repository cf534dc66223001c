//! Failures recorded when a matched step cannot be dispatched.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{SourceLocation, StepDispatchError};

/// A reported step failure.
///
/// Carries the step text that was performed, the pattern and definition
/// site of the matched step, and the dispatch error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    /// Pattern of the matched step definition.
    pub pattern: String,
    /// Step text that was performed.
    pub step_text: String,
    /// Where the step definition was declared.
    pub location: SourceLocation,
    /// Why dispatch was abandoned.
    pub error: StepDispatchError,
}

impl StepFailure {
    /// Creates a failure record.
    #[must_use]
    pub fn new(
        pattern: impl Into<String>,
        step_text: impl Into<String>,
        location: SourceLocation,
        error: StepDispatchError,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            step_text: step_text.into(),
            location,
            error,
        }
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: step '{}' failed: {}", self.location, self.step_text, self.error)
    }
}
