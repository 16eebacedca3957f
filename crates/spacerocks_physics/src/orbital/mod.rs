//! Orbital simulation for the asteroid game
//!
//! Planets pull nearby objects with an inverse-distance force, asteroids
//! fly straight at a heading chosen when they spawn, and the world is a grid
//! of frames (screens) the player moves between by leaving an edge.

mod asteroid;
mod planet;
mod world_map;

pub use asteroid::{Asteroid, AsteroidKey};
pub use planet::{Planet, DEFAULT_GRAVITY_REACH, DEFAULT_GRAVITY_STRENGTH};
pub use world_map::{FrameCoord, FrameEdges, WorldFrame, WorldMap, FRAME_EXTENT};
