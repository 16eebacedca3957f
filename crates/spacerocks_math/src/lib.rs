//! Math Library
//!
//! This crate provides the small vector and matrix toolkit shared by the
//! SpaceRocks simulations and renderer.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector used by sprites and the orbital simulation
//! - [`Vec3`] - 3D vector used by particles and ballistics
//! - [`Mat4`] - 4x4 column-major matrix for view/projection transforms
//!
//! ## Scalar Helpers
//!
//! - [`lerp`] - linear interpolation
//! - [`blend`] - cubic falloff used to shrink particle generations

mod vec2;
mod vec3;
pub mod mat4;
mod scalar;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use mat4::Mat4;
pub use scalar::{blend, lerp};
