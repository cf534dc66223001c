//! Step definitions for typed dispatch BDD scenarios.

pub mod world;

mod given;
mod then;
mod when;
