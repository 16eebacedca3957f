//! Rendering Library
//!
//! This crate provides the wgpu-based renderer shared by the SpaceRocks game
//! and demos. Everything on screen is an instanced shape: quads, disks and
//! rings, sized either in world units or in pixels.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera2D`] - Fixed 2D view of the `[-1, 1]` world square
//! - [`camera::Camera3D`] - Fixed-eye perspective camera with wheel dolly
//! - [`pipeline::ShapePipeline`] - Instanced shape rendering with alpha blending
//! - [`batch::ShapeBatch`] - Collects shape instances from game and simulation types
//! - [`pipeline::FullscreenPipeline`] - A fragment shader over the whole window
//! - [`procedural::RayTraceScene`], [`procedural::JuliaSet`] - State of the full-screen demos

pub mod context;
pub mod camera;
pub mod pipeline;
pub mod batch;
pub mod procedural;

pub use batch::ShapeBatch;
pub use camera::{Camera2D, Camera3D};
pub use context::{ContextError, RenderContext};
pub use pipeline::{
    FullscreenPipeline, JuliaSetPipeline, RayTracePipeline, ShapeInstance, ShapeKind, ShapePipeline,
    ShapeUniforms,
};
pub use procedural::{JuliaSet, RayTraceScene};
