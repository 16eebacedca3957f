//! A single ballistic particle

use spacerocks_math::Vec3;

use super::{Cylinder, ParticleConfig};

/// A particle in flight or resting on the ground
///
/// All times are seconds on the owning emitter's clock.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Generation: root particles are level 0, their children level 1, ...
    pub level: u32,
    /// Whether the particle has returned to the ground
    pub grounded: bool,
    /// When the particle was created
    pub birth: f32,
    /// How long the particle lives
    pub lifetime: f32,
    /// Distance travelled per second along `velocity`
    pub speed: f32,
    /// Display size in pixels
    pub size: f32,
    /// Children emitted per second once grounded
    pub emit_rate: f32,
    pub position: Vec3,
    /// Direction of travel (kept at unit length while airborne)
    pub velocity: Vec3,
    /// RGB color
    pub color: Vec3,
    /// When this particle last emitted a child
    pub prev_emit: f32,
}

impl Particle {
    /// Create an airborne particle born at `birth`
    pub fn new(level: u32, birth: f32, lifetime: f32, speed: f32, size: f32, emit_rate: f32) -> Self {
        Self {
            level,
            grounded: false,
            birth,
            lifetime,
            speed,
            size,
            emit_rate,
            position: Vec3::ZERO,
            velocity: Vec3::Y,
            color: Vec3::ONE,
            prev_emit: birth,
        }
    }

    /// Builder: set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder: set direction of travel
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder: set color
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Check whether the particle has outlived its lifetime
    pub fn is_expired(&self, now: f32) -> bool {
        now > self.birth + self.lifetime
    }

    /// Check whether a grounded particle is due to emit a child
    pub fn ready_to_emit(&self, now: f32) -> bool {
        self.grounded && self.emit_rate > 0.0 && now - self.prev_emit > 1.0 / self.emit_rate
    }

    /// Advance an airborne particle by `dt` seconds
    ///
    /// Gravity bends the direction vector, which is then renormalized, so
    /// `speed` alone controls how fast the particle travels. Falling into the
    /// first obstacle that contains the new position puts the particle back on
    /// that obstacle's cap with its vertical velocity reversed and damped.
    pub fn step(&mut self, dt: f32, obstacles: &[Cylinder], config: &ParticleConfig) {
        self.velocity.y -= dt * config.gravity;
        self.velocity = self.velocity.normalized();
        self.position += self.velocity * (self.speed * dt);

        for cyl in obstacles {
            if cyl.inside(self.position, config.ground) && self.velocity.y < 0.0 {
                self.position.y = cyl.top(config.ground);
                self.velocity.y = -config.bounce_damping * self.velocity.y;
                break;
            }
        }
    }

    /// Move an airborne particle and detect landing
    ///
    /// Grounded particles do not move.
    pub fn update(&mut self, dt: f32, now: f32, obstacles: &[Cylinder], config: &ParticleConfig) {
        if self.grounded {
            return;
        }

        self.step(dt, obstacles, config);

        if self.position.y <= config.ground {
            self.position.y = config.ground;
            self.grounded = true;
            self.prev_emit = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falling(y: f32) -> Particle {
        Particle::new(0, 0.0, 10.0, 1.0, 5.0, 10.0)
            .with_position(Vec3::new(0.0, y, 0.0))
            .with_velocity(Vec3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_expiry() {
        let p = Particle::new(0, 1.0, 2.0, 1.0, 5.0, 10.0);
        assert!(!p.is_expired(3.0)); // exactly at end of life
        assert!(p.is_expired(3.01));
    }

    #[test]
    fn test_step_keeps_direction_normalized() {
        let config = ParticleConfig::default();
        let mut p = Particle::new(0, 0.0, 10.0, 0.4, 5.0, 10.0)
            .with_position(Vec3::new(0.0, 1.0, 0.0))
            .with_velocity(Vec3::new(1.0, 1.0, 0.0).normalized());
        p.step(0.1, &[], &config);
        assert!((p.velocity.length() - 1.0).abs() < 0.0001);
        // Gravity tilts the direction downward
        assert!(p.velocity.y < std::f32::consts::FRAC_1_SQRT_2);
    }

    #[test]
    fn test_landing_clamps_and_grounds() {
        let config = ParticleConfig::default();
        let mut p = falling(0.01);
        p.update(0.1, 5.0, &[], &config);
        assert!(p.grounded);
        assert_eq!(p.position.y, 0.0);
        assert_eq!(p.prev_emit, 5.0);
    }

    #[test]
    fn test_grounded_particle_does_not_move() {
        let config = ParticleConfig::default();
        let mut p = falling(0.0);
        p.grounded = true;
        let before = p.position;
        p.update(1.0, 1.0, &[], &config);
        assert_eq!(p.position, before);
    }

    #[test]
    fn test_bounce_off_cylinder_cap() {
        let config = ParticleConfig::default();
        let cyl = Cylinder::new(0.5, 0.25, Vec3::ONE, Vec3::ZERO);
        let mut p = falling(0.51);
        p.update(0.1, 0.1, &[cyl], &config);

        assert_eq!(p.position.y, 0.5);
        assert!((p.velocity.y - 0.5).abs() < 0.0001);
        assert!(!p.grounded);
    }

    #[test]
    fn test_only_first_obstacle_bounces() {
        let config = ParticleConfig::default();
        let low = Cylinder::new(0.5, 0.25, Vec3::ONE, Vec3::ZERO);
        let lower = Cylinder::new(0.45, 0.25, Vec3::ONE, Vec3::ZERO);
        let mut p = falling(0.44);
        p.step(0.1, &[low, lower], &config);
        assert_eq!(p.position.y, 0.5);
        assert!((p.velocity.y - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_ready_to_emit() {
        let mut p = falling(0.0);
        assert!(!p.ready_to_emit(100.0)); // airborne
        p.grounded = true;
        p.prev_emit = 1.0;
        assert!(!p.ready_to_emit(1.05));
        assert!(p.ready_to_emit(1.11));
    }
}
