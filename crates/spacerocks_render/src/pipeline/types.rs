//! GPU-compatible data types for the shape pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use spacerocks_math::mat4;

/// What the fragment shader cuts out of an instance's quad
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Quad = 0,
    Disk = 1,
    /// A disk with its inner 80% removed
    Ring = 2,
}

/// One shape to draw
///
/// Layout: 48 bytes (must match shape.wgsl InstanceInput)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    /// Center in world space
    pub center: [f32; 3],
    /// Counter-clockwise rotation in radians
    pub rotation: f32,
    /// Half-extents, in world units or pixels depending on `pixel_sized`
    pub half_size: [f32; 2],
    /// A [`ShapeKind`] discriminant
    pub kind: u32,
    /// Non-zero when `half_size` is in pixels
    pub pixel_sized: u32,
    /// RGBA color
    pub color: [f32; 4],
}

impl ShapeInstance {
    /// Create a world-sized shape
    pub fn new(kind: ShapeKind, center: [f32; 3], half_size: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            center,
            rotation: 0.0,
            half_size,
            kind: kind as u32,
            pixel_sized: 0,
            color,
        }
    }

    /// Builder: set rotation in radians
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Builder: treat `half_size` as pixels
    pub fn pixel_sized(mut self) -> Self {
        self.pixel_sized = 1;
        self
    }
}

/// Uniforms for the shape pass
/// Layout: 112 bytes total (must match shape.wgsl Uniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeUniforms {
    /// Projection * view (64 bytes)
    pub view_proj: [[f32; 4]; 4],
    /// World-space direction of the screen's +x axis (w unused)
    pub right: [f32; 4],
    /// World-space direction of the screen's +y axis (w unused)
    pub up: [f32; 4],
    /// Viewport size in pixels
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}

impl Default for ShapeUniforms {
    fn default() -> Self {
        Self {
            view_proj: mat4::IDENTITY,
            right: [1.0, 0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0, 0.0],
            viewport: [1.0, 1.0],
            _padding: [0.0; 2],
        }
    }
}

/// Uniforms for the ray-traced room
/// Layout: 240 bytes total (must match ray_trace.wgsl Uniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RayTraceUniforms {
    /// Sphere centers in xyz, radius in w
    pub spheres: [[f32; 4]; 3],
    /// Walls as `(normal, offset)`, normals facing out of the room
    pub planes: [[f32; 4]; 6],
    /// Light position (w unused)
    pub light: [f32; 4],
    /// Eye position (w unused)
    pub view_point: [f32; 4],
    /// Direction to the screen center (w unused)
    pub view_dir: [f32; 4],
    /// Screen +y in world space, scaled by height over width (w unused)
    pub up: [f32; 4],
    /// Screen +x in world space (w unused)
    pub right: [f32; 4],
    /// Viewport size in pixels
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}

/// Uniforms for the Julia set
/// Layout: 32 bytes total (must match julia_set.wgsl Uniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct JuliaUniforms {
    /// The constant `c` in `z = z^2 + c`, as (real, imaginary)
    pub c: [f32; 2],
    /// Viewport size in pixels
    pub viewport: [f32; 2],
    pub max_iterations: u32,
    /// Magnitude past which `z` has escaped
    pub escape_radius: f32,
    pub _padding: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_shape_instance_size() {
        // 3 center + 1 rotation + 2 half_size + kind + pixel_sized + 4 color = 12 words
        assert_eq!(size_of::<ShapeInstance>(), 48);
    }

    #[test]
    fn test_shape_uniforms_size() {
        // 16 floats view_proj + 4 right + 4 up + 2 viewport + 2 padding = 28 floats
        assert_eq!(size_of::<ShapeUniforms>(), 112);
    }

    #[test]
    fn test_fullscreen_uniform_sizes() {
        // 3 spheres + 6 planes + 5 vectors + viewport row = 15 vec4s
        assert_eq!(size_of::<RayTraceUniforms>(), 240);
        assert_eq!(std::mem::offset_of!(RayTraceUniforms, light), 144);
        assert_eq!(std::mem::offset_of!(RayTraceUniforms, viewport), 224);
        assert_eq!(size_of::<JuliaUniforms>(), 32);
        assert_eq!(std::mem::offset_of!(JuliaUniforms, max_iterations), 16);
    }

    #[test]
    fn test_instance_builders() {
        let i = ShapeInstance::new(ShapeKind::Ring, [0.0; 3], [1.0, 1.0], [1.0; 4])
            .with_rotation(0.5)
            .pixel_sized();
        assert_eq!(i.kind, 2);
        assert_eq!(i.pixel_sized, 1);
        assert_eq!(i.rotation, 0.5);
    }
}
