//! Planets and their gravity

use spacerocks_math::Vec2;

/// Default gravity strength
pub const DEFAULT_GRAVITY_STRENGTH: f32 = 0.0005;

/// Default distance beyond which a planet exerts no pull
pub const DEFAULT_GRAVITY_REACH: f32 = 0.5;

/// A planet in frame-local coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Planet {
    pub position: Vec2,
    /// Half-extents of the planet's sprite
    pub scale: Vec2,
    pub gravity_strength: f32,
    pub gravity_reach: f32,
}

impl Planet {
    /// Create a planet with default gravity
    pub fn new(position: Vec2, scale: Vec2) -> Self {
        Self {
            position,
            scale,
            gravity_strength: DEFAULT_GRAVITY_STRENGTH,
            gravity_reach: DEFAULT_GRAVITY_REACH,
        }
    }

    /// Builder: set gravity strength and reach
    pub fn with_gravity(mut self, strength: f32, reach: f32) -> Self {
        self.gravity_strength = strength;
        self.gravity_reach = reach;
        self
    }

    /// Collision radius (the sprite's horizontal half-extent)
    pub fn radius(&self) -> f32 {
        self.scale.x
    }

    /// Check whether a point is on or inside the planet
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.position).length_squared() <= self.radius() * self.radius()
    }

    /// Per-tick speed toward the planet at `distance`: `reach / distance * strength`
    pub fn gravity_speed(&self, distance: f32) -> f32 {
        (self.gravity_reach / distance) * self.gravity_strength
    }

    /// Displacement this planet applies to a point in one tick
    ///
    /// Zero outside the planet's reach and at its exact center.
    pub fn pull_on(&self, point: Vec2) -> Vec2 {
        let delta = self.position - point;
        let distance = delta.length();
        if distance >= self.gravity_reach || distance <= f32::EPSILON {
            return Vec2::ZERO;
        }
        delta.normalized() * self.gravity_speed(distance)
    }

    /// Closest point on the planet's surface to `point`
    pub fn surface_point(&self, point: Vec2) -> Vec2 {
        let dir = (point - self.position).normalized();
        let dir = if dir == Vec2::ZERO { Vec2::Y } else { dir };
        self.position + dir * self.radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_speed_law() {
        let planet = Planet::new(Vec2::ZERO, Vec2::splat(0.1));
        // At the edge of reach the speed equals the strength
        assert!((planet.gravity_speed(0.5) - 0.0005).abs() < 1e-9);
        // Half the distance, twice the speed
        assert!((planet.gravity_speed(0.25) - 0.001).abs() < 1e-9);
    }

    #[test]
    fn test_pull_points_toward_planet() {
        let planet = Planet::new(Vec2::new(0.2, 0.0), Vec2::splat(0.1));
        let pull = planet.pull_on(Vec2::ZERO);
        assert!(pull.x > 0.0);
        assert!(pull.y.abs() < 1e-9);
        assert!((pull.length() - planet.gravity_speed(0.2)).abs() < 1e-7);
    }

    #[test]
    fn test_no_pull_beyond_reach() {
        let planet = Planet::new(Vec2::ZERO, Vec2::splat(0.1));
        assert_eq!(planet.pull_on(Vec2::new(0.5, 0.0)), Vec2::ZERO);
        assert_eq!(planet.pull_on(Vec2::new(0.9, 0.9)), Vec2::ZERO);
    }

    #[test]
    fn test_no_pull_at_center() {
        let planet = Planet::new(Vec2::new(0.3, 0.3), Vec2::splat(0.1));
        assert_eq!(planet.pull_on(Vec2::new(0.3, 0.3)), Vec2::ZERO);
    }

    #[test]
    fn test_contains_and_surface() {
        let planet = Planet::new(Vec2::ZERO, Vec2::splat(0.2));
        assert!(planet.contains(Vec2::new(0.1, 0.1)));
        assert!(!planet.contains(Vec2::new(0.3, 0.0)));
        let s = planet.surface_point(Vec2::new(0.05, 0.0));
        assert!((s.x - 0.2).abs() < 1e-6);
    }
}
