//! Rendering pipeline components
//!
//! A single instanced pipeline draws every shape. Each instance expands to a
//! quad in the vertex shader; the fragment shader cuts disks and rings out of
//! that quad. Shapes are depth tested, with ties going to the later draw.
//!
//! The full-screen pipeline skips geometry altogether: one covering triangle
//! and a fragment shader that computes every pixel.

pub mod types;
pub mod shape_pipeline;
pub mod fullscreen_pipeline;

pub use types::{JuliaUniforms, RayTraceUniforms, ShapeInstance, ShapeKind, ShapeUniforms};
pub use fullscreen_pipeline::{FullscreenPipeline, JuliaSetPipeline, RayTracePipeline};
pub use shape_pipeline::{ShapePipeline, DEPTH_FORMAT, INITIAL_INSTANCE_CAPACITY};
