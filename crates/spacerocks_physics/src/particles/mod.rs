//! Ballistic particle system
//!
//! Particles launch from an emitter, arc under gravity, bounce off cylinder
//! obstacles and come to rest on the ground. A grounded particle keeps
//! emitting smaller children until it expires.

mod emitter;
mod obstacle;
mod particle;

pub use emitter::{Emitter, ParticleTemplate};
pub use obstacle::Cylinder;
pub use particle::Particle;

/// Default maximum number of live particles
pub const DEFAULT_CAPACITY: usize = 5000;

/// Configuration for the particle simulation
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    /// Maximum number of live particles
    pub capacity: usize,
    /// Downward acceleration applied to the direction vector
    pub gravity: f32,
    /// Height of the ground plane
    pub ground: f32,
    /// Fraction of vertical velocity kept after bouncing off an obstacle
    pub bounce_damping: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            gravity: 1.0,
            ground: 0.0,
            bounce_damping: 0.5,
        }
    }
}

impl ParticleConfig {
    /// Builder: set capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builder: set gravity
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }
}
