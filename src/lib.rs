//! SpaceRocks application layer
//!
//! Configuration, window/GPU/timing systems and input mapping shared by the
//! `spacerocks` game binary and the `particles` and `go_ballistic` demos.

pub mod config;
pub mod input;
pub mod systems;
