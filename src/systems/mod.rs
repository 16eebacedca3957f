//! Application systems
//!
//! Window, GPU and timing plumbing shared by the game and the demos.

mod render;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use simulation::{FrameTime, SimulationSystem};
pub use window::{status_title, WindowError, WindowSystem};
