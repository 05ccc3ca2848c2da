//! Step definitions for task reassignment scenarios.

mod given;
mod then;
pub mod world;
