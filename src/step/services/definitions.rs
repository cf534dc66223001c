//! Step registration adapter.
//!
//! Provides [`StepDefinitions`], which turns a pattern plus a typed callback
//! into a uniform [`StepHandler`] registration on a [`StepHost`], and
//! delegates step references to the host.

use std::sync::Arc;

use crate::step::{
    domain::{FromMatch, SourceLocation, StepCaptures, StepDispatchError, convert_capture},
    ports::{StepHandler, StepHost, StepHostResult, StepOutcome},
};

/// Registers typed step definitions on a step host.
///
/// Each registration form is an explicitly named method. Patterns are
/// forwarded to the host verbatim together with the caller-supplied
/// [`SourceLocation`].
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use stepbind::step::{
///     adapters::memory::InMemoryStepRegistry, services::StepDefinitions,
/// };
/// use stepbind::step_location;
///
/// let steps = StepDefinitions::new(Arc::new(InMemoryStepRegistry::new()));
/// let cukes = Arc::new(Mutex::new(0_u32));
/// let sink = Arc::clone(&cukes);
/// steps
///     .step_value(r"I have (\d+) cukes", step_location!(), move |count: u32| {
///         if let Ok(mut total) = sink.lock() {
///             *total += count;
///         }
///     })
///     .expect("pattern registers");
///
/// let outcome = steps.perform("Given I have 42 cukes").expect("step matches");
/// assert!(outcome.is_passed());
/// assert_eq!(*cukes.lock().expect("lock"), 42);
/// ```
pub struct StepDefinitions<H>
where
    H: StepHost,
{
    host: Arc<H>,
}

impl<H> Clone for StepDefinitions<H>
where
    H: StepHost,
{
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
        }
    }
}

impl<H> StepDefinitions<H>
where
    H: StepHost,
{
    /// Creates a registration adapter over `host`.
    #[must_use]
    pub const fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    /// Returns the underlying step host.
    #[must_use]
    pub const fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Registers a step whose callback takes no arguments.
    ///
    /// Captured substrings are ignored; every match invokes `callback` once.
    ///
    /// # Errors
    ///
    /// Returns the host's error when it rejects the registration.
    pub fn step<F>(
        &self,
        pattern: &str,
        location: SourceLocation,
        mut callback: F,
    ) -> StepHostResult<()>
    where
        F: FnMut() + Send + 'static,
    {
        let handler: StepHandler = Box::new(move |_: &StepCaptures| {
            callback();
            Ok(())
        });
        self.register(pattern, location, handler)
    }

    /// Registers a step whose callback receives every captured substring
    /// converted to `T`, in capture order.
    ///
    /// If any substring fails to convert, the callback is not invoked and a
    /// single [`StepDispatchError::ConversionFailure`] naming the first
    /// offending substring is reported.
    ///
    /// # Errors
    ///
    /// Returns the host's error when it rejects the registration.
    pub fn step_values<T, F>(
        &self,
        pattern: &str,
        location: SourceLocation,
        mut callback: F,
    ) -> StepHostResult<()>
    where
        T: FromMatch + 'static,
        F: FnMut(Vec<T>) + Send + 'static,
    {
        let source = pattern.to_owned();
        let handler: StepHandler = Box::new(move |captures: &StepCaptures| {
            let values = captures
                .iter()
                .map(|captured| convert_capture::<T>(captured, &source))
                .collect::<Result<Vec<_>, StepDispatchError>>()?;
            callback(values);
            Ok(())
        });
        self.register(pattern, location, handler)
    }

    /// Registers a step whose callback receives the first captured
    /// substring converted to `T`.
    ///
    /// Reports [`StepDispatchError::ArityMismatch`] when nothing was
    /// captured and [`StepDispatchError::ConversionFailure`] when the
    /// substring does not convert; the callback is skipped in both cases.
    ///
    /// # Errors
    ///
    /// Returns the host's error when it rejects the registration.
    pub fn step_value<T, F>(
        &self,
        pattern: &str,
        location: SourceLocation,
        mut callback: F,
    ) -> StepHostResult<()>
    where
        T: FromMatch + 'static,
        F: FnMut(T) + Send + 'static,
    {
        let source = pattern.to_owned();
        let handler: StepHandler = Box::new(move |captures: &StepCaptures| {
            let captured = captures
                .get(0)
                .ok_or_else(|| arity_mismatch(&source, 1, captures))?;
            callback(convert_capture::<T>(captured, &source)?);
            Ok(())
        });
        self.register(pattern, location, handler)
    }

    /// Registers a step whose callback receives the first two captured
    /// substrings converted to `A` and `B`.
    ///
    /// Reports [`StepDispatchError::ArityMismatch`] with the actual count when
    /// fewer than two substrings were captured. Each substring is converted
    /// independently and the first conversion failure is reported; the
    /// callback only runs when both succeed.
    ///
    /// # Errors
    ///
    /// Returns the host's error when it rejects the registration.
    pub fn step_pair<A, B, F>(
        &self,
        pattern: &str,
        location: SourceLocation,
        mut callback: F,
    ) -> StepHostResult<()>
    where
        A: FromMatch + 'static,
        B: FromMatch + 'static,
        F: FnMut(A, B) + Send + 'static,
    {
        let source = pattern.to_owned();
        let handler: StepHandler = Box::new(move |captures: &StepCaptures| {
            let (Some(first), Some(second)) = (captures.get(0), captures.get(1)) else {
                return Err(arity_mismatch(&source, 2, captures));
            };
            let converted_first = convert_capture::<A>(first, &source);
            let converted_second = convert_capture::<B>(second, &source);
            callback(converted_first?, converted_second?);
            Ok(())
        });
        self.register(pattern, location, handler)
    }

    /// Performs a previously registered step by its step text.
    ///
    /// Matching and lookup belong to the host; the text is forwarded
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns the host's error when no unique step matches `text`.
    pub fn perform(&self, text: &str) -> StepHostResult<StepOutcome> {
        self.host.perform_step(text)
    }

    fn register(
        &self,
        pattern: &str,
        location: SourceLocation,
        handler: StepHandler,
    ) -> StepHostResult<()> {
        self.host.add_step(pattern, location, handler)
    }
}

fn arity_mismatch(pattern: &str, expected: usize, captures: &StepCaptures) -> StepDispatchError {
    StepDispatchError::ArityMismatch {
        pattern: pattern.to_owned(),
        expected,
        found: captures.len(),
    }
}
