//! Given steps for typed dispatch BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use rstest_bdd_macros::given;
use stepbind::step_location;

use super::world::{DispatchWorld, record};

#[given("a step registry")]
fn a_step_registry(world: &mut DispatchWorld) {
    *world = DispatchWorld::new();
}

#[given(r#"a single-value step for "{pattern}""#)]
fn a_single_value_step(world: &mut DispatchWorld, pattern: String) -> eyre::Result<()> {
    let values = Arc::clone(&world.values);
    world
        .steps
        .step_value(&pattern, step_location!(), move |value: i64| {
            record(&values, value);
        })
        .wrap_err("register single-value step")
}

#[given(r#"a list step for "{pattern}""#)]
fn a_list_step(world: &mut DispatchWorld, pattern: String) -> eyre::Result<()> {
    let values = Arc::clone(&world.values);
    world
        .steps
        .step_values(&pattern, step_location!(), move |captured: Vec<i64>| {
            for value in captured {
                record(&values, value);
            }
        })
        .wrap_err("register list step")
}

#[given(r#"a pair step for "{pattern}""#)]
fn a_pair_step(world: &mut DispatchWorld, pattern: String) -> eyre::Result<()> {
    let values = Arc::clone(&world.values);
    world
        .steps
        .step_pair(&pattern, step_location!(), move |left: i64, right: i64| {
            record(&values, left + right);
        })
        .wrap_err("register pair step")
}

#[given(r#"a plain step for "{pattern}""#)]
fn a_plain_step(world: &mut DispatchWorld, pattern: String) -> eyre::Result<()> {
    let runs = Arc::clone(&world.plain_runs);
    world
        .steps
        .step(&pattern, step_location!(), move || {
            if let Ok(mut count) = runs.lock() {
                *count += 1;
            }
        })
        .wrap_err("register plain step")
}

#[given(r#"a step "{pattern}" that performs "{target}""#)]
fn a_referencing_step(
    world: &mut DispatchWorld,
    pattern: String,
    target: String,
) -> eyre::Result<()> {
    let steps = world.steps.clone();
    world
        .steps
        .step(&pattern, step_location!(), move || {
            if let Err(error) = steps.perform(&target) {
                tracing::error!(%error, "referenced step could not be performed");
            }
        })
        .wrap_err("register referencing step")
}
