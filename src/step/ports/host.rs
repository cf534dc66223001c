//! Step host port: the registry that owns steps, matches step texts, and
//! records failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::step::domain::{SourceLocation, StepCaptures, StepDispatchError, StepFailure};

/// Result type for step host operations.
pub type StepHostResult<T> = Result<T, StepHostError>;

/// Callback invoked with the substrings captured by a matched step.
///
/// Returning an error abandons the invocation; the host records it as a
/// [`StepFailure`] instead of propagating it.
pub type StepHandler = Box<dyn FnMut(&StepCaptures) -> Result<(), StepDispatchError> + Send>;

/// Result of performing a step whose handler was found and invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The handler ran to completion.
    Passed,
    /// The handler reported a failure, which has been recorded.
    Failed(StepFailure),
}

impl StepOutcome {
    /// Returns `true` when the step passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns the recorded failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&StepFailure> {
        match self {
            Self::Passed => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

/// Host contract for registering and performing steps.
///
/// The host decides how a free-text step is matched against registered
/// patterns and supplies the captured substrings to the chosen handler.
#[cfg_attr(test, mockall::automock)]
pub trait StepHost: Send + Sync {
    /// Registers a pattern and its handler.
    ///
    /// `location` is diagnostic only and never used for matching.
    ///
    /// # Errors
    ///
    /// Returns [`StepHostError::InvalidPattern`] when the pattern cannot be
    /// compiled or [`StepHostError::DuplicatePattern`] when it is already
    /// registered.
    fn add_step(
        &self,
        pattern: &str,
        location: SourceLocation,
        handler: StepHandler,
    ) -> StepHostResult<()>;

    /// Finds the registered step matching `text` and invokes its handler.
    ///
    /// Dispatch failures reported by the handler are recorded through
    /// [`StepHost::record_failure`] and surface as [`StepOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`StepHostError`] when no step, or more than one step, matches
    /// `text`, or when the matched step is already running.
    fn perform_step(&self, text: &str) -> StepHostResult<StepOutcome>;

    /// Records a failure in the host's failure-reporting channel.
    fn record_failure(&self, failure: StepFailure);
}

/// Errors returned by step host implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StepHostError {
    /// The pattern is not a valid regular expression.
    #[error("invalid step pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Rejected pattern source.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A step with the same pattern is already registered.
    #[error("step pattern '{0}' is already registered")]
    DuplicatePattern(String),

    /// No registered pattern matches the step text.
    #[error("no step definition matches '{0}'")]
    UndefinedStep(String),

    /// Several registered patterns match the step text.
    #[error("step '{text}' is ambiguous; matching patterns: {}", .patterns.join(", "))]
    AmbiguousStep {
        /// Performed step text.
        text: String,
        /// Every matching pattern, in registration order.
        patterns: Vec<String>,
    },

    /// The matched step performed itself while still running.
    #[error("step pattern '{0}' was performed recursively")]
    RecursiveInvocation(String),

    /// Registry state is unavailable.
    #[error("step registry unavailable: {0}")]
    Unavailable(String),
}

/// How a host resolves a step text matched by several patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Fail with [`StepHostError::AmbiguousStep`].
    #[default]
    RejectAmbiguous,
    /// Dispatch to the earliest registered match.
    FirstMatch,
}

/// Configuration for step matching.
///
/// # Examples
///
/// ```
/// use stepbind::step::ports::{MatchPolicy, StepRegistryConfig};
///
/// let config = StepRegistryConfig::default();
/// assert_eq!(config.match_policy, MatchPolicy::RejectAmbiguous);
///
/// let lenient = StepRegistryConfig::lenient();
/// assert!(!lenient.anchor_patterns);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepRegistryConfig {
    /// Resolution of step texts matched by several patterns.
    pub match_policy: MatchPolicy,
    /// Whether a leading `Given`/`When`/`Then`/`And`/`But` is dropped before
    /// matching.
    pub strip_keywords: bool,
    /// Whether patterns must match the whole step text.
    pub anchor_patterns: bool,
}

impl Default for StepRegistryConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::RejectAmbiguous,
            strip_keywords: true,
            anchor_patterns: true,
        }
    }
}

impl StepRegistryConfig {
    /// Creates a lenient configuration: first match wins and patterns may
    /// match anywhere in the step text.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            match_policy: MatchPolicy::FirstMatch,
            anchor_patterns: false,
            ..Default::default()
        }
    }

    /// Creates a strict configuration: anchored, unambiguous, and matched
    /// against the raw step text without keyword stripping.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            match_policy: MatchPolicy::RejectAmbiguous,
            strip_keywords: false,
            anchor_patterns: true,
        }
    }
}
