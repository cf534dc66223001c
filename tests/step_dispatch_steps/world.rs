//! Shared world state for typed dispatch BDD scenarios.

use std::sync::{Arc, Mutex};

use eyre::eyre;
use rstest::fixture;
use stepbind::step::{
    adapters::memory::InMemoryStepRegistry,
    ports::{StepHostError, StepOutcome},
    services::StepDefinitions,
};

/// Registration adapter type used by the BDD world.
pub type TestSteps = StepDefinitions<InMemoryStepRegistry>;

/// Scenario world for typed dispatch behaviour tests.
pub struct DispatchWorld {
    /// Registration adapter under test.
    pub steps: TestSteps,
    /// Values passed to typed step callbacks.
    pub values: Arc<Mutex<Vec<i64>>>,
    /// Number of times plain steps ran.
    pub plain_runs: Arc<Mutex<u32>>,
    /// Outcome of the last performed step.
    pub last_outcome: Option<StepOutcome>,
    /// Error from the last performed step.
    pub last_error: Option<StepHostError>,
}

impl DispatchWorld {
    /// Creates a world with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: StepDefinitions::new(Arc::new(InMemoryStepRegistry::new())),
            values: Arc::default(),
            plain_runs: Arc::default(),
            last_outcome: None,
            last_error: None,
        }
    }

    /// Returns values recorded by typed callbacks.
    pub fn recorded_values(&self) -> eyre::Result<Vec<i64>> {
        self.values
            .lock()
            .map(|values| values.clone())
            .map_err(|err| eyre!("recorded values unavailable: {err}"))
    }

    /// Returns how many times plain steps ran.
    pub fn plain_run_count(&self) -> eyre::Result<u32> {
        self.plain_runs
            .lock()
            .map(|runs| *runs)
            .map_err(|err| eyre!("plain run count unavailable: {err}"))
    }
}

impl Default for DispatchWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DispatchWorld {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    DispatchWorld::default()
}

/// Appends `value` to a shared recording, ignoring a poisoned lock.
pub fn record(values: &Mutex<Vec<i64>>, value: i64) {
    if let Ok(mut recorded) = values.lock() {
        recorded.push(value);
    }
}
