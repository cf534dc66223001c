//! When steps for typed dispatch BDD scenarios.

use rstest_bdd_macros::when;

use super::world::DispatchWorld;

#[when(r#"I perform the step "{text}""#)]
fn perform_step(world: &mut DispatchWorld, text: String) {
    match world.steps.perform(&text) {
        Ok(outcome) => {
            world.last_outcome = Some(outcome);
            world.last_error = None;
        }
        Err(error) => {
            world.last_outcome = None;
            world.last_error = Some(error);
        }
    }
}
