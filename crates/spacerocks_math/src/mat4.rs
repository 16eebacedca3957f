//! 4x4 Matrix utilities for view and projection transforms
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL's `mat4x4<f32>`
//! layout so they can be uploaded without transposing.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) and apply the perspective divide
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    let x = m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0];
    let y = m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1];
    let z = m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2];
    let w = m[0][3] * p.x + m[1][3] * p.y + m[2][3] * p.z + m[3][3];
    if w.abs() > f32::EPSILON {
        Vec3::new(x / w, y / w, z / w)
    } else {
        Vec3::new(x, y, z)
    }
}

/// Translation matrix
pub fn translation(t: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = t.x;
    m[3][1] = t.y;
    m[3][2] = t.z;
    m
}

/// Non-uniform scale matrix
pub fn scale(s: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = s.x;
    m[1][1] = s.y;
    m[2][2] = s.z;
    m
}

/// Rotation about the Z axis (counter-clockwise in the XY plane)
pub fn rotation_z(radians: f32) -> Mat4 {
    let (sn, cs) = radians.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[0][1] = sn;
    m[1][0] = -sn;
    m[1][1] = cs;
    m
}

/// Right-handed perspective projection (OpenGL-style clip depth)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * nf, -1.0],
        [0.0, 0.0, 2.0 * far * near * nf, 0.0],
    ]
}

/// Orthographic projection mapping the given box to clip space
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rl = 1.0 / (right - left);
    let tb = 1.0 / (top - bottom);
    let fn_ = 1.0 / (far - near);

    [
        [2.0 * rl, 0.0, 0.0, 0.0],
        [0.0, 2.0 * tb, 0.0, 0.0],
        [0.0, 0.0, -2.0 * fn_, 0.0],
        [-(right + left) * rl, -(top + bottom) * tb, -(far + near) * fn_, 1.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 0.0001
    }

    #[test]
    fn test_identity_mul() {
        let t = translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mul(IDENTITY, t), t);
        assert_eq!(mul(t, IDENTITY), t);
    }

    #[test]
    fn test_mul_order_applies_right_first() {
        // Scale then translate: point (1,0,0) -> (2,0,0) -> (3,0,0)
        let m = mul(translation(Vec3::X), scale(Vec3::new(2.0, 2.0, 2.0)));
        assert!(approx(transform_point(m, Vec3::X), Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rotation_z() {
        let m = rotation_z(std::f32::consts::FRAC_PI_2);
        assert!(approx(transform_point(m, Vec3::X), Vec3::Y));
    }

    #[test]
    fn test_look_at_moves_target_onto_negative_z() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let view = look_at(eye, Vec3::ZERO, Vec3::Y);
        let p = transform_point(view, Vec3::ZERO);
        assert!(approx(p, Vec3::new(0.0, 0.0, -10.0)));
    }

    #[test]
    fn test_orthographic_maps_box_to_ndc() {
        let m = orthographic(-2.0, 2.0, -1.0, 1.0, -1.0, 1.0);
        assert!(approx(transform_point(m, Vec3::new(2.0, 1.0, 0.0)), Vec3::new(1.0, 1.0, 0.0)));
        assert!(approx(transform_point(m, Vec3::new(-2.0, -1.0, 0.0)), Vec3::new(-1.0, -1.0, 0.0)));
    }

    #[test]
    fn test_perspective_center_stays_centered() {
        let proj = perspective(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0);
        let p = transform_point(proj, Vec3::new(0.0, 0.0, -5.0));
        assert!(p.x.abs() < 0.0001 && p.y.abs() < 0.0001);
        assert!(p.z > -1.0 && p.z < 1.0);
    }
}
