//! Simulation for SpaceRocks
//!
//! This crate provides the numerical simulations behind the demos:
//! - Particles: a bounded emitter with ballistic motion, cylinder obstacles,
//!   grounding and re-emission from grounded parents
//! - Ballistics: cannon aiming and projectile flight with gravity and drag
//! - Orbital: planets with inverse-distance gravity, homing asteroids and a
//!   tiled map of world frames

pub mod ballistics;
pub mod orbital;
pub mod particles;
pub mod random;

// Re-export commonly used types
pub use ballistics::{Cannon, Projectile, MAX_ARC_STEPS};
pub use orbital::{
    Asteroid, AsteroidKey, FrameCoord, FrameEdges, Planet, WorldFrame, WorldMap, FRAME_EXTENT,
};
pub use particles::{Cylinder, Emitter, Particle, ParticleConfig, ParticleTemplate};
