//! Stepbind: regex-bound step definitions for behaviour-style tests.
//!
//! This crate lets textual "Given/When/Then" steps be declared as regular
//! expression patterns bound to typed callbacks, then matched and dispatched
//! while a test runs.
//!
//! # Architecture
//!
//! Stepbind follows hexagonal architecture principles:
//!
//! - **Domain**: Patterns, captures, typed conversion, and failures
//! - **Ports**: The step host contract that owns and matches steps
//! - **Adapters**: An in-memory step host
//! - **Services**: The registration adapter exposing typed step forms
//!
//! # Modules
//!
//! - [`step`]: Step definition, matching, and dispatch

pub mod step;

/// Builds a [`SourceLocation`](crate::step::domain::SourceLocation) for the
/// line where the macro is invoked.
///
/// # Examples
///
/// ```
/// let location = stepbind::step_location!();
/// assert!(location.line() > 0);
/// ```
#[macro_export]
macro_rules! step_location {
    () => {
        $crate::step::domain::SourceLocation::new(file!(), line!())
    };
}
