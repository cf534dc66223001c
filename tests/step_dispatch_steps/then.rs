//! Then steps for typed dispatch BDD scenarios.

use eyre::{Result, eyre};
use rstest_bdd_macros::then;
use stepbind::step::{
    domain::{StepDispatchError, StepFailure},
    ports::{StepHostError, StepOutcome},
};

use super::world::DispatchWorld;

fn last_outcome(world: &DispatchWorld) -> Result<&StepOutcome> {
    world.last_outcome.as_ref().ok_or_else(|| {
        eyre!(
            "expected a step outcome, got error {:?}",
            world.last_error
        )
    })
}

fn last_failure(world: &DispatchWorld) -> Result<&StepFailure> {
    last_outcome(world)?
        .failure()
        .ok_or_else(|| eyre!("expected the step to fail"))
}

fn last_error(world: &DispatchWorld) -> Result<&StepHostError> {
    world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre!("expected performing the step to fail"))
}

#[then("the step passes")]
fn step_passes(world: &DispatchWorld) -> Result<()> {
    let outcome = last_outcome(world)?;
    assert!(outcome.is_passed(), "step failed: {outcome:?}");
    Ok(())
}

#[then(r#"the recorded values are "{expected}""#)]
fn recorded_values_are(world: &DispatchWorld, expected: String) -> Result<()> {
    let expected_values = expected
        .split(',')
        .map(|value| value.trim().parse::<i64>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    assert_eq!(world.recorded_values()?, expected_values);
    Ok(())
}

#[then("no values were recorded")]
fn no_values_recorded(world: &DispatchWorld) -> Result<()> {
    assert!(world.recorded_values()?.is_empty());
    Ok(())
}

#[then(r#"the step fails converting "{value}""#)]
fn step_fails_converting(world: &DispatchWorld, value: String) -> Result<()> {
    let failure = last_failure(world)?;
    assert!(matches!(
        &failure.error,
        StepDispatchError::ConversionFailure { value: failed, target_type, .. }
        if *failed == value && target_type == "i64"
    ));
    assert!(failure.to_string().contains(&failure.pattern));
    Ok(())
}

#[then(r#"the failure message contains "{fragment}""#)]
fn failure_message_contains(world: &DispatchWorld, fragment: String) -> Result<()> {
    let failure = last_failure(world)?;
    assert!(
        failure.error.to_string().contains(&fragment),
        "unexpected failure: {failure}"
    );
    Ok(())
}

#[then("the failure log holds {count} entries")]
fn failure_log_holds(world: &DispatchWorld, count: usize) -> Result<()> {
    assert_eq!(world.steps.host().failures()?.len(), count);
    Ok(())
}

#[then("the plain step ran {count} times")]
fn plain_step_ran(world: &DispatchWorld, count: u32) -> Result<()> {
    assert_eq!(world.plain_run_count()?, count);
    Ok(())
}

#[then("performing fails as ambiguous")]
fn fails_as_ambiguous(world: &DispatchWorld) -> Result<()> {
    let error = last_error(world)?;
    assert!(
        matches!(error, StepHostError::AmbiguousStep { patterns, .. } if patterns.len() == 2),
        "unexpected error: {error}"
    );
    Ok(())
}

#[then(r#"performing fails as undefined for "{text}""#)]
fn fails_as_undefined(world: &DispatchWorld, text: String) -> Result<()> {
    assert_eq!(last_error(world)?, &StepHostError::UndefinedStep(text));
    Ok(())
}
