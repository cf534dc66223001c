//! Thread-safe in-memory step registry.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, ThreadId};

use crate::step::{
    domain::{SourceLocation, StepCaptures, StepFailure, StepPattern, strip_keyword},
    ports::{
        MatchPolicy, StepHandler, StepHost, StepHostError, StepHostResult, StepOutcome,
        StepRegistryConfig,
    },
};

/// In-memory step host.
///
/// Clones share the same registered steps and failure log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStepRegistry {
    state: Arc<RwLock<RegistryState>>,
    config: StepRegistryConfig,
}

#[derive(Debug, Default)]
struct RegistryState {
    steps: Vec<RegisteredStep>,
    failures: Vec<StepFailure>,
}

struct RegisteredStep {
    pattern: StepPattern,
    location: SourceLocation,
    slot: Arc<HandlerSlot>,
}

/// A registered callback and the thread currently running it.
struct HandlerSlot {
    handler: Mutex<StepHandler>,
    running_on: Mutex<Option<ThreadId>>,
}

impl HandlerSlot {
    fn new(handler: StepHandler) -> Self {
        Self {
            handler: Mutex::new(handler),
            running_on: Mutex::new(None),
        }
    }

    fn is_running_on(&self, thread: ThreadId) -> bool {
        *self.running_on.lock().unwrap_or_else(PoisonError::into_inner) == Some(thread)
    }
}

/// Marks a slot as running on one thread until dropped, including on unwind.
struct RunningMarker<'a> {
    running_on: &'a Mutex<Option<ThreadId>>,
}

impl<'a> RunningMarker<'a> {
    fn enter(slot: &'a HandlerSlot, thread: ThreadId) -> Self {
        *slot.running_on.lock().unwrap_or_else(PoisonError::into_inner) = Some(thread);
        Self {
            running_on: &slot.running_on,
        }
    }
}

impl Drop for RunningMarker<'_> {
    fn drop(&mut self) {
        *self.running_on.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl fmt::Debug for RegisteredStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredStep")
            .field("pattern", &self.pattern.source())
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// A matched step detached from the registry lock.
struct MatchedStep {
    pattern: String,
    location: SourceLocation,
    captures: StepCaptures,
    slot: Arc<HandlerSlot>,
}

impl InMemoryStepRegistry {
    /// Creates an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with a custom configuration.
    #[must_use]
    pub fn with_config(config: StepRegistryConfig) -> Self {
        Self {
            state: Arc::default(),
            config,
        }
    }

    /// Returns the matching configuration.
    #[must_use]
    pub const fn config(&self) -> &StepRegistryConfig {
        &self.config
    }

    /// Returns registered pattern sources in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`StepHostError::Unavailable`] when registry state is poisoned.
    pub fn patterns(&self) -> StepHostResult<Vec<String>> {
        let state = self.state.read().map_err(unavailable)?;
        Ok(state
            .steps
            .iter()
            .map(|step| step.pattern.source().to_owned())
            .collect())
    }

    /// Returns the number of registered steps.
    ///
    /// # Errors
    ///
    /// Returns [`StepHostError::Unavailable`] when registry state is poisoned.
    pub fn len(&self) -> StepHostResult<usize> {
        Ok(self.state.read().map_err(unavailable)?.steps.len())
    }

    /// Returns `true` when no steps are registered.
    ///
    /// # Errors
    ///
    /// Returns [`StepHostError::Unavailable`] when registry state is poisoned.
    pub fn is_empty(&self) -> StepHostResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Returns a snapshot of recorded failures in the order they occurred.
    ///
    /// # Errors
    ///
    /// Returns [`StepHostError::Unavailable`] when registry state is poisoned.
    pub fn failures(&self) -> StepHostResult<Vec<StepFailure>> {
        Ok(self.state.read().map_err(unavailable)?.failures.clone())
    }

    /// Drains and returns recorded failures.
    ///
    /// # Errors
    ///
    /// Returns [`StepHostError::Unavailable`] when registry state is poisoned.
    pub fn take_failures(&self) -> StepHostResult<Vec<StepFailure>> {
        let mut state = self.state.write().map_err(unavailable)?;
        Ok(std::mem::take(&mut state.failures))
    }

    fn normalise<'a>(&self, text: &'a str) -> &'a str {
        if self.config.strip_keywords {
            strip_keyword(text).1
        } else {
            text.trim()
        }
    }

    fn find_match(&self, text: &str) -> StepHostResult<MatchedStep> {
        let state = self.state.read().map_err(unavailable)?;
        let mut matches = state.steps.iter().filter_map(|step| {
            step.pattern.captures(text).map(|captures| MatchedStep {
                pattern: step.pattern.source().to_owned(),
                location: step.location.clone(),
                captures,
                slot: Arc::clone(&step.slot),
            })
        });

        let first = matches
            .next()
            .ok_or_else(|| StepHostError::UndefinedStep(text.to_owned()))?;

        if self.config.match_policy == MatchPolicy::RejectAmbiguous {
            let others: Vec<String> = matches.map(|other| other.pattern).collect();
            if !others.is_empty() {
                let mut patterns = vec![first.pattern];
                patterns.extend(others);
                return Err(StepHostError::AmbiguousStep {
                    text: text.to_owned(),
                    patterns,
                });
            }
        }

        tracing::trace!(
            step = text,
            pattern = %first.pattern,
            captured = first.captures.len(),
            "matched step"
        );
        Ok(first)
    }
}

impl StepHost for InMemoryStepRegistry {
    fn add_step(
        &self,
        pattern: &str,
        location: SourceLocation,
        handler: StepHandler,
    ) -> StepHostResult<()> {
        let compiled = StepPattern::compile(pattern, self.config.anchor_patterns).map_err(
            |error| StepHostError::InvalidPattern {
                pattern: error.pattern,
                reason: error.reason,
            },
        )?;

        let mut state = self.state.write().map_err(unavailable)?;
        if state
            .steps
            .iter()
            .any(|step| step.pattern.source() == pattern)
        {
            return Err(StepHostError::DuplicatePattern(pattern.to_owned()));
        }

        tracing::debug!(pattern, %location, "registered step");
        state.steps.push(RegisteredStep {
            pattern: compiled,
            location,
            slot: Arc::new(HandlerSlot::new(handler)),
        });
        Ok(())
    }

    fn perform_step(&self, text: &str) -> StepHostResult<StepOutcome> {
        let step_text = self.normalise(text);
        let matched = self.find_match(step_text)?;

        let current = thread::current().id();
        if matched.slot.is_running_on(current) {
            return Err(StepHostError::RecursiveInvocation(matched.pattern));
        }

        // Other threads queue behind the running handler. A handler that
        // panicked earlier stays registered and runs again.
        let mut handler = matched
            .slot
            .handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let running = RunningMarker::enter(&matched.slot, current);
        let result = (*handler)(&matched.captures);
        drop(running);
        drop(handler);

        match result {
            Ok(()) => Ok(StepOutcome::Passed),
            Err(error) => {
                let failure = StepFailure::new(matched.pattern, step_text, matched.location, error);
                self.record_failure(failure.clone());
                Ok(StepOutcome::Failed(failure))
            }
        }
    }

    fn record_failure(&self, failure: StepFailure) {
        tracing::warn!(
            pattern = %failure.pattern,
            location = %failure.location,
            error = %failure.error,
            "step failed"
        );
        match self.state.write() {
            Ok(mut state) => state.failures.push(failure),
            Err(poisoned) => poisoned.into_inner().failures.push(failure),
        }
    }
}

fn unavailable(err: impl ToString) -> StepHostError {
    StepHostError::Unavailable(err.to_string())
}
