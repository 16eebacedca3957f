//! Input Handling
//!
//! This crate turns winit keyboard and mouse events into the actions the
//! SpaceRocks apps need: repeating arrow keys and mouse dragging of sprites.

mod key_repeat;
mod drag_controller;

pub use key_repeat::{ArrowPad, KeyRepeat, DEFAULT_REPEAT_DELAY};
pub use drag_controller::{DragTarget, SpriteDragController, PIXELS_PER_LINE};
