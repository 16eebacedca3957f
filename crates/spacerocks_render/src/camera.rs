//! Fixed cameras for the 2D game and the 3D demos
//!
//! Both cameras produce [`ShapeUniforms`] for the shape pipeline.

use spacerocks_math::{mat4, Vec3};

use crate::pipeline::ShapeUniforms;

/// Maps the `[-1, 1]` world square onto the largest centered square of the window
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera2D;

impl Camera2D {
    pub fn new() -> Self {
        Self
    }

    /// Projection that keeps the world square undistorted
    pub fn view_proj(&self, aspect: f32) -> mat4::Mat4 {
        if aspect >= 1.0 {
            mat4::scale(Vec3::new(1.0 / aspect, 1.0, 1.0))
        } else {
            mat4::scale(Vec3::new(1.0, aspect, 1.0))
        }
    }

    pub fn uniforms(&self, viewport: [f32; 2]) -> ShapeUniforms {
        ShapeUniforms {
            view_proj: self.view_proj(viewport[0] / viewport[1].max(1.0)),
            viewport,
            ..Default::default()
        }
    }
}

/// A perspective camera looking at a fixed target
///
/// The mouse wheel moves the eye toward or away from the target.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera3D {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Closest the eye may get to the target
    pub min_distance: f32,
    /// Farthest the eye may get from the target
    pub max_distance: f32,
}

impl Camera3D {
    /// Create a camera with a 30 degree field of view
    pub fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            eye,
            target,
            up,
            fov: 30.0,
            near: 0.01,
            far: 100.0,
            min_distance: 0.5,
            max_distance: 50.0,
        }
    }

    /// Builder: set field of view (degrees) and clip planes
    pub fn with_projection(mut self, fov: f32, near: f32, far: f32) -> Self {
        self.fov = fov;
        self.near = near;
        self.far = far;
        self
    }

    /// Distance from eye to target
    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// Dolly by 10% per wheel notch; positive spin moves closer
    pub fn wheel(&mut self, spin: f32) {
        let offset = self.eye - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        let new_distance = (distance * (1.0 - spin * 0.1)).clamp(self.min_distance, self.max_distance);
        self.eye = self.target + offset * (new_distance / distance);
    }

    pub fn view(&self) -> mat4::Mat4 {
        mat4::look_at(self.eye, self.target, self.up)
    }

    pub fn projection(&self, aspect: f32) -> mat4::Mat4 {
        mat4::perspective(self.fov.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> mat4::Mat4 {
        mat4::mul(self.projection(aspect), self.view())
    }

    /// Screen-aligned axes in world space, for billboards
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalized();
        let right = forward.cross(self.up).normalized();
        let up = right.cross(forward);
        (right, up)
    }

    pub fn uniforms(&self, viewport: [f32; 2]) -> ShapeUniforms {
        let (right, up) = self.billboard_axes();
        ShapeUniforms {
            view_proj: self.view_proj(viewport[0] / viewport[1].max(1.0)),
            right: [right.x, right.y, right.z, 0.0],
            up: [up.x, up.y, up.z, 0.0],
            viewport,
            _padding: [0.0; 2],
        }
    }
}
