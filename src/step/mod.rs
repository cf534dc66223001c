//! Regex-bound step definitions for behaviour-style tests.
//!
//! Textual "Given/When/Then" steps are declared as regular-expression
//! patterns bound to typed callbacks, then matched and dispatched when a
//! scenario runs. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Registration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
