//! Registration services for step definitions.

mod definitions;

pub use definitions::StepDefinitions;
