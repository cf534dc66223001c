//! Port contracts for step registration and dispatch.
//!
//! Ports define host-agnostic interfaces used by the step registration
//! services.

pub mod host;

pub use host::{
    MatchPolicy, StepHandler, StepHost, StepHostError, StepHostResult, StepOutcome,
    StepRegistryConfig,
};
