//! Scalar interpolation helpers

/// Linear interpolation: `a + t * (b - a)`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Cubic blend with f(0) = 1, f(1) = 0 and zero slope at both ends
///
/// Symmetric in `x`; anything beyond 1 in magnitude returns 0.
pub fn blend(x: f32) -> f32 {
    let x = x.abs();
    if x < f32::EPSILON {
        return 1.0;
    }
    if x > 1.0 {
        return 0.0;
    }
    let x2 = x * x;
    let x4 = x2 * x2;
    (-4.0 / 9.0) * x2 * x4 + (17.0 / 9.0) * x4 + (-22.0 / 9.0) * x2 + 1.0
}
