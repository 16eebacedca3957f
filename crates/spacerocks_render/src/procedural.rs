//! Scenes drawn entirely by a fragment shader
//!
//! These hold the CPU-side state of the full-screen demos and turn it into
//! uniforms for [`FullscreenPipeline`](crate::pipeline::FullscreenPipeline).

use spacerocks_math::Vec3;

use crate::pipeline::{JuliaUniforms, RayTraceUniforms};

/// A room of six walls holding three spheres that circle their common center
#[derive(Clone, Debug, PartialEq)]
pub struct RayTraceScene {
    pub light: Vec3,
    /// Sphere centers in xyz, radius in w, at time zero
    pub spheres: [[f32; 4]; 3],
    /// Walls as `(normal, offset)`
    pub planes: [[f32; 4]; 6],
    pub view_point: Vec3,
    pub view_dir: Vec3,
    /// Revolution speed in degrees per second (positive is clockwise seen from above)
    pub spin: f32,
}

impl Default for RayTraceScene {
    fn default() -> Self {
        Self {
            light: Vec3::new(2.0, 0.0, 1.0),
            spheres: [
                [-1.7, -0.3, 2.0, 0.6],
                [0.0, 0.1, 2.0, 0.9],
                [1.3, 0.0, 2.0, 0.4],
            ],
            planes: [
                [-1.0, 0.0, 0.0, -3.0],
                [1.0, 0.0, 0.0, -3.0],
                [0.0, -1.0, 0.0, -3.0],
                [0.0, 1.0, 0.0, -3.0],
                [0.0, 0.0, -1.0, -3.0],
                [0.0, 0.0, 1.0, -3.0],
            ],
            view_point: Vec3::new(0.0, 0.0, -1.0),
            view_dir: Vec3::Z,
            spin: 60.0,
        }
    }
}

impl RayTraceScene {
    /// Average of the sphere centers
    pub fn center_of_mass(&self) -> Vec3 {
        let sum = self
            .spheres
            .iter()
            .fold(Vec3::ZERO, |acc, s| acc + Vec3::new(s[0], s[1], s[2]));
        sum / self.spheres.len() as f32
    }

    /// Spheres after `seconds` of revolving about the center of mass in the XZ plane
    pub fn spheres_at(&self, seconds: f32) -> [[f32; 4]; 3] {
        let angle = (-self.spin * seconds).to_radians();
        let (s, c) = angle.sin_cos();
        let com = self.center_of_mass();

        self.spheres.map(|sphere| {
            let q = Vec3::new(sphere[0], sphere[1], sphere[2]) - com;
            [
                q.x * c - q.z * s + com.x,
                q.y + com.y,
                q.x * s + q.z * c + com.z,
                sphere[3],
            ]
        })
    }

    /// Uniforms for time `seconds` and a viewport in pixels
    ///
    /// The screen spans `[-1, 1]` horizontally; the vertical axis is scaled by
    /// the aspect ratio so spheres stay round.
    pub fn uniforms(&self, seconds: f32, viewport: [f32; 2]) -> RayTraceUniforms {
        let aspect = viewport[1] / viewport[0].max(1.0);
        RayTraceUniforms {
            spheres: self.spheres_at(seconds),
            planes: self.planes,
            light: padded(self.light),
            view_point: padded(self.view_point),
            view_dir: padded(self.view_dir),
            up: [0.0, aspect, 0.0, 0.0],
            right: [1.0, 0.0, 0.0, 0.0],
            viewport,
            _padding: [0.0; 2],
        }
    }
}

/// A uniform `vec4` with `w` unused
fn padded(v: Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}

/// Julia set parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JuliaSet {
    /// (real, imaginary)
    pub c: [f32; 2],
    pub max_iterations: u32,
    pub escape_radius: f32,
}

impl Default for JuliaSet {
    fn default() -> Self {
        Self {
            c: [-0.8, 0.156],
            max_iterations: 1000,
            escape_radius: 500.0,
        }
    }
}

impl JuliaSet {
    /// Pick `c` from a window position (origin top-left)
    ///
    /// Both parts run from -1 at the left/top edge to 1 at the right/bottom.
    pub fn set_from_cursor(&mut self, x: f64, y: f64, width: u32, height: u32) {
        self.c = [
            2.0 * x as f32 / width.max(1) as f32 - 1.0,
            2.0 * y as f32 / height.max(1) as f32 - 1.0,
        ];
    }

    pub fn uniforms(&self, viewport: [f32; 2]) -> JuliaUniforms {
        JuliaUniforms {
            c: self.c,
            viewport,
            max_iterations: self.max_iterations,
            escape_radius: self.escape_radius,
            _padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(s: [f32; 4]) -> Vec3 {
        Vec3::new(s[0], s[1], s[2])
    }

    #[test]
    fn test_spheres_start_in_place() {
        let scene = RayTraceScene::default();
        for (a, b) in scene.spheres_at(0.0).iter().zip(scene.spheres.iter()) {
            assert!((center(*a) - center(*b)).length() < 1e-5);
            assert_eq!(a[3], b[3]);
        }
    }

    #[test]
    fn test_spheres_keep_distance_to_center_of_mass() {
        let scene = RayTraceScene::default();
        let com = scene.center_of_mass();
        let moved = scene.spheres_at(1.7);
        for (before, after) in scene.spheres.iter().zip(moved.iter()) {
            let r0 = (center(*before) - com).length();
            let r1 = (center(*after) - com).length();
            assert!((r0 - r1).abs() < 1e-5);
            assert!((before[1] - after[1]).abs() < 1e-6);
            assert_eq!(before[3], after[3]);
        }
    }

    #[test]
    fn test_full_revolution_takes_six_seconds() {
        let scene = RayTraceScene::default();
        let half = scene.spheres_at(3.0);
        let full = scene.spheres_at(6.0);
        let com = scene.center_of_mass();
        for i in 0..3 {
            assert!((center(full[i]) - center(scene.spheres[i])).length() < 1e-4);
            // Half a turn mirrors the sphere through the center in XZ
            let mirrored = com * 2.0 - center(scene.spheres[i]);
            assert!((half[i][0] - mirrored.x).abs() < 1e-4);
            assert!((half[i][2] - mirrored.z).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ray_trace_up_follows_aspect() {
        let u = RayTraceScene::default().uniforms(0.0, [800.0, 400.0]);
        assert_eq!(u.up, [0.0, 0.5, 0.0, 0.0]);
        assert_eq!(u.right, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(u.light, [2.0, 0.0, 1.0, 0.0]);
        assert_eq!(u.viewport, [800.0, 400.0]);
    }

    #[test]
    fn test_julia_cursor_maps_window_to_unit_square() {
        let mut julia = JuliaSet::default();
        julia.set_from_cursor(0.0, 0.0, 800, 600);
        assert_eq!(julia.c, [-1.0, -1.0]);
        julia.set_from_cursor(400.0, 450.0, 800, 600);
        assert_eq!(julia.c, [0.0, 0.5]);
    }

    #[test]
    fn test_julia_uniforms() {
        let u = JuliaSet::default().uniforms([640.0, 480.0]);
        assert_eq!(u.c, [-0.8, 0.156]);
        assert_eq!(u.max_iterations, 1000);
        assert_eq!(u.escape_radius, 500.0);
        assert_eq!(u.viewport, [640.0, 480.0]);
    }
}
