//! In-memory step host adapter.

mod registry;

pub use registry::InMemoryStepRegistry;
