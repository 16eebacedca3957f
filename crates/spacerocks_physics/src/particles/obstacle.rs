//! Cylinder obstacles standing on the ground

use spacerocks_math::Vec3;

/// A vertical cylinder resting on the ground plane
///
/// Particles that fall onto the cap bounce back up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylinder {
    pub height: f32,
    pub radius: f32,
    /// RGB color for display
    pub color: Vec3,
    /// Center of the base; only x and z are used for containment
    pub location: Vec3,
}

impl Cylinder {
    /// Create a new cylinder
    pub fn new(height: f32, radius: f32, color: Vec3, location: Vec3) -> Self {
        Self { height, radius, color, location }
    }

    /// Height of the cap in world coordinates
    pub fn top(&self, ground: f32) -> f32 {
        ground + self.height
    }

    /// Check whether a point is inside the cylinder
    ///
    /// The radial test is strict, so points exactly on the wall are outside.
    pub fn inside(&self, p: Vec3, ground: f32) -> bool {
        if p.y > self.top(ground) {
            return false;
        }
        let dx = p.x - self.location.x;
        let dz = p.z - self.location.z;
        dx * dx + dz * dz < self.radius * self.radius
    }

    /// The three cylinders of the fountain demo
    pub fn fountain_set(ground: f32) -> Vec<Cylinder> {
        let orange = Vec3::new(1.0, 0.7, 0.0);
        let blue = Vec3::new(0.0, 0.0, 0.7);
        let green = Vec3::new(0.0, 0.7, 0.0);
        vec![
            Cylinder::new(0.5, 0.25, orange, Vec3::new(-0.3, ground, 0.6)),
            Cylinder::new(1.0 / 3.0, 0.5, blue, Vec3::new(0.3, ground, -0.2)),
            Cylinder::new(0.25, 1.0 / 3.0, green, Vec3::new(0.2, ground, -0.7)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside() {
        let cyl = Cylinder::new(1.0, 0.5, Vec3::ONE, Vec3::ZERO);
        assert!(cyl.inside(Vec3::new(0.0, 0.5, 0.0), 0.0));
        assert!(cyl.inside(Vec3::new(0.3, 1.0, 0.3), 0.0)); // on the cap
        assert!(!cyl.inside(Vec3::new(0.0, 1.1, 0.0), 0.0)); // above
        assert!(!cyl.inside(Vec3::new(0.5, 0.5, 0.0), 0.0)); // on the wall
    }

    #[test]
    fn test_inside_respects_ground_offset() {
        let cyl = Cylinder::new(1.0, 0.5, Vec3::ONE, Vec3::ZERO);
        assert!(cyl.inside(Vec3::new(0.0, 1.5, 0.0), 1.0));
        assert!(!cyl.inside(Vec3::new(0.0, 1.5, 0.0), 0.0));
    }

    #[test]
    fn test_fountain_set() {
        let set = Cylinder::fountain_set(0.0);
        assert_eq!(set.len(), 3);
        assert!(set.iter().all(|c| c.location.y == 0.0));
    }
}
