//! Adapter implementations of the step ports.

pub mod memory;
