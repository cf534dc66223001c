//! Domain model for step definitions and dispatch.
//!
//! The step domain models patterns, captured substrings, typed conversion,
//! and the failures reported when a matched step cannot be dispatched. All
//! registry and matching infrastructure stays outside the domain boundary.

mod captures;
mod conversion;
mod error;
mod failure;
mod keyword;
mod location;
mod pattern;

pub use captures::StepCaptures;
pub use conversion::{FromMatch, convert_capture};
pub use error::{ParseStepKeywordError, StepDispatchError, StepPatternError};
pub use failure::StepFailure;
pub use keyword::{StepKeyword, strip_keyword};
pub use location::SourceLocation;
pub use pattern::StepPattern;
