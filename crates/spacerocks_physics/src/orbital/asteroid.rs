//! Asteroids that fly straight at a target

use rand::Rng;
use slotmap::new_key_type;
use spacerocks_math::Vec2;

use super::FRAME_EXTENT;
use crate::random::random_between;

new_key_type! {
    /// Key to an asteroid in the game's asteroid map
    pub struct AsteroidKey;
}

/// An asteroid in frame-local coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Asteroid {
    pub position: Vec2,
    /// Collision radius / sprite half-extent
    pub scale: f32,
    /// Distance travelled per tick
    pub speed: f32,
    /// Direction of travel in radians
    pub heading: f32,
    alive: bool,
}

impl Asteroid {
    /// Create a live asteroid heading along +X
    pub fn new(position: Vec2, scale: f32, speed: f32) -> Self {
        Self {
            position,
            scale,
            speed,
            heading: 0.0,
            alive: true,
        }
    }

    /// Spawn at a random point on the frame border
    ///
    /// One of the four edges is picked uniformly, then a uniform point along it.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, speed_range: (f32, f32), scale: f32) -> Self {
        let speed = random_between(rng, speed_range.0, speed_range.1);
        Self::new(Self::random_edge_point(rng), scale, speed)
    }

    /// A uniformly chosen point on the border of the frame
    pub fn random_edge_point<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
        let along = random_between(rng, -FRAME_EXTENT, FRAME_EXTENT);
        match rng.gen_range(0..4) {
            0 => Vec2::new(-FRAME_EXTENT, along),
            1 => Vec2::new(FRAME_EXTENT, along),
            2 => Vec2::new(along, -FRAME_EXTENT),
            _ => Vec2::new(along, FRAME_EXTENT),
        }
    }

    /// Point the asteroid at a target
    pub fn aim_at(&mut self, target: Vec2) {
        self.heading = self.position.angle_to(target);
    }

    /// Velocity per tick
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.heading) * self.speed
    }

    /// Move one tick along the heading
    pub fn advance(&mut self) {
        self.position += self.velocity();
    }

    /// Whether the asteroid has left the frame by more than `margin`
    pub fn is_out_of_bounds(&self, margin: f32) -> bool {
        let limit = FRAME_EXTENT + margin;
        self.position.x.abs() > limit || self.position.y.abs() > limit
    }

    /// Circle overlap test against another body
    pub fn touches(&self, center: Vec2, radius: f32) -> bool {
        let reach = self.scale + radius;
        (center - self.position).length_squared() < reach * reach
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_spawn_on_border() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let a = Asteroid::spawn(&mut rng, (0.002, 0.006), 0.05);
            let on_x_edge = (a.position.x.abs() - 1.0).abs() < 1e-6;
            let on_y_edge = (a.position.y.abs() - 1.0).abs() < 1e-6;
            assert!(on_x_edge || on_y_edge);
            assert!(a.position.x.abs() <= 1.0 && a.position.y.abs() <= 1.0);
            assert!(a.speed >= 0.002 && a.speed <= 0.006);
            assert!(a.is_alive());
        }
    }

    #[test]
    fn test_advance_toward_target() {
        let mut a = Asteroid::new(Vec2::new(-1.0, 0.0), 0.05, 0.1);
        a.aim_at(Vec2::ZERO);
        a.advance();
        assert!((a.position.x + 0.9).abs() < 1e-6);
        assert!(a.position.y.abs() < 1e-6);
    }

    #[test]
    fn test_heading_fixed_after_aim() {
        let mut a = Asteroid::new(Vec2::new(0.0, -1.0), 0.05, 0.1);
        a.aim_at(Vec2::new(0.0, 1.0));
        let heading = a.heading;
        a.advance();
        a.advance();
        assert_eq!(a.heading, heading);
        assert!((a.position.y + 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_out_of_bounds() {
        let a = Asteroid::new(Vec2::new(1.15, 0.0), 0.05, 0.1);
        assert!(!a.is_out_of_bounds(0.2));
        assert!(a.is_out_of_bounds(0.1));
    }

    #[test]
    fn test_touches() {
        let a = Asteroid::new(Vec2::ZERO, 0.1, 0.0);
        assert!(a.touches(Vec2::new(0.15, 0.0), 0.1));
        assert!(!a.touches(Vec2::new(0.25, 0.0), 0.1));
    }
}
