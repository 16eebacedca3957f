//! Cannon and projectile simulation
//!
//! The world is Z-up: the ground is the XY plane and projectiles fall along -Z.

use spacerocks_math::Vec3;

/// Upper bound on samples when predicting a flight path
pub const MAX_ARC_STEPS: usize = 10_000;

/// Azimuth limits in degrees
pub const AZIMUTH_RANGE: (f32, f32) = (-45.0, 45.0);

/// Elevation limits in degrees
pub const ELEVATION_RANGE: (f32, f32) = (0.0, 90.0);

/// Aim changes at or below this magnitude (degrees) are ignored
pub const AIM_DEAD_ZONE: f32 = 0.01;

/// A projectile under gravity and linear drag
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    /// Direction of travel, scaled by `speed` when integrating
    pub velocity: Vec3,
    pub speed: f32,
    pub gravity: f32,
    /// Fraction of velocity lost per second
    pub drag: f32,
    /// Height at which the projectile is considered landed
    pub ground: f32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::new(2.0, 0.5, 0.0)
    }
}

impl Projectile {
    /// Create a projectile at rest with the given flight parameters
    pub fn new(speed: f32, gravity: f32, drag: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            speed,
            gravity,
            drag,
            ground: 0.05,
        }
    }

    /// Place the projectile and set its direction of travel
    pub fn set(&mut self, position: Vec3, velocity: Vec3) {
        self.position = position;
        self.velocity = velocity;
    }

    /// Whether the projectile is above the ground
    pub fn is_airborne(&self) -> bool {
        self.position.z > self.ground
    }

    /// Advance by `dt` seconds
    ///
    /// A landed projectile stays put. Returns true while still airborne.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.is_airborne() {
            self.position += self.velocity * (dt * self.speed);
            self.velocity.z -= dt * self.gravity;
            self.velocity *= 1.0 - dt * self.drag;
        }
        self.is_airborne()
    }
}

/// A cannon with azimuth/elevation aim
#[derive(Clone, Debug, PartialEq)]
pub struct Cannon {
    /// Rotation about +Z in degrees; 0 aims along +Y
    pub azimuth: f32,
    /// Angle above the ground plane in degrees
    pub elevation: f32,
    /// Pivot point of the barrel
    pub base: Vec3,
    pub barrel_length: f32,
}

impl Default for Cannon {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            elevation: 45.0,
            base: Vec3::new(0.0, 0.0, 0.1),
            barrel_length: 0.3,
        }
    }
}

fn within(x: f32, (min, max): (f32, f32)) -> bool {
    x >= min && x <= max
}

impl Cannon {
    /// Adjust aim by the given deltas in degrees
    ///
    /// Each delta applies only when it is larger than the dead zone and the
    /// result stays within limits. Returns true if the aim changed.
    pub fn change_aim(&mut self, d_azimuth: f32, d_elevation: f32) -> bool {
        let mut changed = false;
        if d_azimuth.abs() > AIM_DEAD_ZONE && within(self.azimuth + d_azimuth, AZIMUTH_RANGE) {
            self.azimuth += d_azimuth;
            changed = true;
        }
        if d_elevation.abs() > AIM_DEAD_ZONE && within(self.elevation + d_elevation, ELEVATION_RANGE) {
            self.elevation += d_elevation;
            changed = true;
        }
        changed
    }

    /// Unit vector along the barrel
    pub fn direction(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.to_radians().sin_cos();
        let (sin_el, cos_el) = self.elevation.to_radians().sin_cos();
        Vec3::new(cos_el * sin_az, cos_el * cos_az, sin_el)
    }

    /// End of the barrel
    pub fn muzzle(&self) -> Vec3 {
        self.base + self.direction() * self.barrel_length
    }

    /// Put a projectile in the barrel, pointing along it
    pub fn load(&self, projectile: &mut Projectile) {
        let dir = self.direction();
        projectile.set(self.muzzle() - dir * 0.05, dir);
    }

    /// Predict the flight of a projectile fired now
    ///
    /// Samples positions every `step` seconds, from the loaded position up to
    /// and including the landing point, for at most [`MAX_ARC_STEPS`] steps.
    pub fn arc(&self, template: &Projectile, step: f32) -> Vec<Vec3> {
        let mut p = template.clone();
        self.load(&mut p);

        let mut points = vec![p.position];
        for _ in 0..MAX_ARC_STEPS {
            let airborne = p.step(step);
            points.push(p.position);
            if !airborne {
                break;
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_integrates_and_applies_gravity() {
        let mut p = Projectile::new(2.0, 0.5, 0.0);
        p.set(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(p.step(0.1));
        assert!((p.position.x - 0.2).abs() < 0.0001);
        assert!((p.velocity.z + 0.05).abs() < 0.0001);
    }

    #[test]
    fn test_landed_projectile_stays() {
        let mut p = Projectile::default();
        p.set(Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(!p.step(0.1));
        assert_eq!(p.position, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_drag_slows_projectile() {
        let mut p = Projectile::new(1.0, 0.0, 0.5);
        p.set(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
        p.step(0.1);
        assert!((p.velocity.x - 0.95).abs() < 0.0001);
    }

    #[test]
    fn test_aim_limits() {
        let mut cannon = Cannon::default();
        cannon.azimuth = 45.0;
        assert!(!cannon.change_aim(1.0, 0.0));
        assert_eq!(cannon.azimuth, 45.0);
        assert!(cannon.change_aim(-1.0, 0.0));
        assert_eq!(cannon.azimuth, 44.0);

        cannon.elevation = 0.0;
        assert!(!cannon.change_aim(0.0, -1.0));
        assert!(cannon.change_aim(0.0, 1.0));
        assert_eq!(cannon.elevation, 1.0);
    }

    #[test]
    fn test_aim_dead_zone() {
        let mut cannon = Cannon::default();
        assert!(!cannon.change_aim(0.005, -0.01));
        assert_eq!(cannon.azimuth, 0.0);
        assert_eq!(cannon.elevation, 45.0);
    }

    #[test]
    fn test_direction() {
        let mut cannon = Cannon::default();
        cannon.elevation = 0.0;
        let d = cannon.direction();
        assert!((d.y - 1.0).abs() < 0.0001);

        cannon.elevation = 90.0;
        let d = cannon.direction();
        assert!((d.z - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_arc_lands() {
        let cannon = Cannon::default();
        let arc = cannon.arc(&Projectile::default(), 0.01);
        assert!(arc.len() > 2);
        let last = arc.last().unwrap();
        assert!(last.z <= 0.05);
        // Fired along +Y
        assert!(last.y > cannon.muzzle().y);
        assert!(arc[..arc.len() - 1].iter().all(|p| p.z > 0.05));
    }

    #[test]
    fn test_arc_is_bounded_without_gravity() {
        let mut cannon = Cannon::default();
        cannon.elevation = 90.0;
        let arc = cannon.arc(&Projectile::new(1.0, 0.0, 0.0), 0.01);
        assert_eq!(arc.len(), MAX_ARC_STEPS + 1);
    }
}
