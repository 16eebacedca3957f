//! Core types for the SpaceRocks game
//!
//! This crate builds the game on top of the simulations in `spacerocks_physics`:
//!
//! - [`Sprite`] - A rotated quad with hit testing, dragging and wheel scaling
//! - [`WorldLayout`] - Loadable/saveable description of the world's frames and planets
//! - [`LayoutValidator`] - Static checks on a layout before it is used
//! - [`SpaceRocks`] - The asteroid game: actor, world map, asteroids, lives and score
//! - [`Lerper`], [`Breath`] - Sprite animation over time

mod sprite;
mod layout;
mod game;
mod animation;

pub use sprite::{Sprite, MIN_SPRITE_SCALE};
pub use layout::{
    FrameTemplate, LayoutLoadError, LayoutSaveError, LayoutValidator, PlanetTemplate,
    ValidationError, WorldLayout,
};
pub use game::{GameConfig, GameEvent, GameState, SpaceRocks};
pub use animation::{sine_blend, Breath, Lerper};

// Re-export the simulation types the game exposes
pub use spacerocks_math::Vec2;
pub use spacerocks_physics::{Asteroid, AsteroidKey, FrameCoord, Planet, WorldFrame, WorldMap};
