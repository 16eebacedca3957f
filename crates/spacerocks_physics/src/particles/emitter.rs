//! Particle emitter with a bounded pool

use rand::{rngs::StdRng, SeedableRng};
use spacerocks_math::{blend, lerp, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

use super::{Cylinder, Particle, ParticleConfig};
use crate::random::{random01, random_between};

/// One bound of the random range new particles are drawn from
///
/// The emitter holds a minimum and a maximum template; every attribute of a
/// new particle is interpolated between the two.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleTemplate {
    pub lifetime: f32,
    pub speed: f32,
    pub size: f32,
    pub emit_rate: f32,
    pub position: Vec3,
    pub color: Vec3,
}

impl ParticleTemplate {
    /// Lower bound of the fountain demo: short-lived, slow, small, black
    pub fn fountain_min(spawn: Vec3) -> Self {
        Self {
            lifetime: 0.15,
            speed: 0.1,
            size: 5.0,
            emit_rate: 15.0,
            position: spawn,
            color: Vec3::ZERO,
        }
    }

    /// Upper bound of the fountain demo: long-lived, fast, large, white
    pub fn fountain_max(spawn: Vec3) -> Self {
        Self {
            lifetime: 7.0,
            speed: 0.4,
            size: 9.0,
            emit_rate: 50.0,
            position: spawn,
            color: Vec3::ONE,
        }
    }
}

/// A particle emitter
///
/// Particles live in a `Vec` that never grows past `config.capacity`.
/// Expired particles are evicted by moving the last particle into their slot,
/// so particle indices are not stable across updates.
pub struct Emitter {
    particles: Vec<Particle>,
    /// Lower bound for new particles
    pub min: ParticleTemplate,
    /// Upper bound for new particles
    pub max: ParticleTemplate,
    obstacles: Vec<Cylinder>,
    /// Simulation configuration
    pub config: ParticleConfig,
    rng: StdRng,
    /// Clock value of the latest update
    now: f32,
    prev_time: f32,
    next_emit_time: f32,
    /// Set once the full-pool message has been logged
    reported_full: bool,
}

impl Emitter {
    /// Create an emitter with the given bounds and a seeded random source
    pub fn new(config: ParticleConfig, min: ParticleTemplate, max: ParticleTemplate, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(config.capacity),
            min,
            max,
            obstacles: Vec::new(),
            config,
            rng: StdRng::seed_from_u64(seed),
            now: 0.0,
            prev_time: 0.0,
            next_emit_time: 0.0,
            reported_full: false,
        }
    }

    /// Create the fountain demo emitter: particles launch from `(0, height, 0)`
    /// over the three demo cylinders
    pub fn fountain(config: ParticleConfig, height: f32, seed: u64) -> Self {
        let spawn = Vec3::new(0.0, height, 0.0);
        let obstacles = Cylinder::fountain_set(config.ground);
        let mut emitter = Self::new(
            config,
            ParticleTemplate::fountain_min(spawn),
            ParticleTemplate::fountain_max(spawn),
            seed,
        );
        emitter.obstacles = obstacles;
        emitter
    }

    /// Add an obstacle
    pub fn add_obstacle(&mut self, cylinder: Cylinder) {
        self.obstacles.push(cylinder);
    }

    /// Get the obstacles
    pub fn obstacles(&self) -> &[Cylinder] {
        &self.obstacles
    }

    /// Get the live particles
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particles are alive
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Maximum number of live particles
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Clock value of the latest update
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Insert a fully built particle
    ///
    /// Returns its index, or `None` when the pool is full.
    pub fn spawn(&mut self, particle: Particle) -> Option<usize> {
        if self.particles.len() >= self.config.capacity {
            return self.spawn_rejected();
        }
        self.particles.push(particle);
        Some(self.particles.len() - 1)
    }

    /// Create a new particle randomly between the min and max templates
    ///
    /// Deeper generations draw from a narrower range: every attribute is
    /// interpolated with `blend(level / 10) * random`, so past level 10
    /// children take the minimum values. Position and color come from the
    /// arguments when given. Returns `None` when the pool is full.
    pub fn create_particle(
        &mut self,
        level: u32,
        position: Option<Vec3>,
        color: Option<Vec3>,
    ) -> Option<usize> {
        if self.particles.len() >= self.config.capacity {
            return self.spawn_rejected();
        }

        let b = blend(level as f32 / 10.0);
        let (min, max) = (self.min, self.max);
        let lifetime = lerp(min.lifetime, max.lifetime, b * random01(&mut self.rng));
        let speed = lerp(min.speed, max.speed, b * random01(&mut self.rng));
        let size = lerp(min.size, max.size, b * random01(&mut self.rng));
        let emit_rate = lerp(min.emit_rate, max.emit_rate, b * random01(&mut self.rng));

        let position = position.unwrap_or_else(|| self.random_vec(min.position, max.position));
        let color = color.unwrap_or_else(|| self.random_vec(min.color, max.color));

        let azimuth = random_between(&mut self.rng, 0.0, 2.0 * PI);
        let elevation = random_between(&mut self.rng, 0.0, FRAC_PI_2);
        let cos_elevation = elevation.cos();
        let velocity = Vec3::new(
            cos_elevation * azimuth.cos(),
            elevation.sin(),
            cos_elevation * azimuth.sin(),
        );

        let particle = Particle::new(level, self.now, lifetime, speed, size, emit_rate)
            .with_position(position)
            .with_velocity(velocity)
            .with_color(color);

        self.spawn(particle)
    }

    fn spawn_rejected(&mut self) -> Option<usize> {
        if !self.reported_full {
            log::debug!("Particle pool full ({} particles)", self.config.capacity);
            self.reported_full = true;
        }
        None
    }

    fn random_vec(&mut self, min: Vec3, max: Vec3) -> Vec3 {
        let mut v = Vec3::ZERO;
        for i in 0..3 {
            v.set(i, random_between(&mut self.rng, min.get(i), max.get(i)));
        }
        v
    }

    /// Advance the emitter to clock time `now` (seconds)
    ///
    /// This performs:
    /// 1. Eviction of expired particles (swap-remove)
    /// 2. Child emission from grounded particles, motion for airborne ones
    /// 3. Emission of a new root particle when one is due
    pub fn update(&mut self, now: f32) {
        let dt = now - self.prev_time;
        self.prev_time = now;
        self.now = now;

        // Phase 1: evict expired particles
        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].is_expired(now) {
                self.particles.swap_remove(i);
            } else {
                i += 1;
            }
        }
        if self.particles.len() < self.config.capacity {
            self.reported_full = false;
        }

        // Phase 2: the bound is re-read each pass so children spawned here
        // are moved this frame too
        let mut k = 0;
        while k < self.particles.len() {
            let p = &self.particles[k];
            if p.grounded {
                if p.ready_to_emit(now) {
                    let (level, position, color) = (p.level + 1, p.position, p.color);
                    self.create_particle(level, Some(position), Some(color));
                    self.particles[k].prev_emit = now;
                }
            } else {
                self.particles[k].update(dt, now, &self.obstacles, &self.config);
            }
            k += 1;
        }

        // Phase 3: possibly emit a new root particle
        if now > self.next_emit_time {
            self.create_particle(0, None, None);
            let rate = random_between(&mut self.rng, self.min.emit_rate, self.max.emit_rate);
            self.next_emit_time = now + 1.0 / rate;
        }
    }

    /// Remove every particle and restart the emission schedule
    pub fn reset(&mut self) {
        self.particles.clear();
        self.next_emit_time = self.now;
        self.reported_full = false;
        log::info!("Particle emitter reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitter() -> Emitter {
        Emitter::fountain(ParticleConfig::default(), 1.0, 42)
    }

    fn resting(size: f32, lifetime: f32) -> Particle {
        let mut p = Particle::new(0, 0.0, lifetime, 0.1, size, 10.0);
        p.grounded = true;
        p
    }

    #[test]
    fn test_first_update_emits_root() {
        let mut e = emitter();
        assert!(e.is_empty());
        e.update(0.01);
        assert_eq!(e.len(), 1);
        assert_eq!(e.particles()[0].level, 0);
    }

    #[test]
    fn test_root_particle_attributes_within_bounds() {
        let mut e = emitter();
        for _ in 0..100 {
            e.create_particle(0, None, None);
        }
        for p in e.particles() {
            assert!(p.lifetime >= 0.15 && p.lifetime <= 7.0);
            assert!(p.speed >= 0.1 && p.speed <= 0.4);
            assert!(p.size >= 5.0 && p.size <= 9.0);
            assert!(p.emit_rate >= 15.0 && p.emit_rate <= 50.0);
            assert_eq!(p.position, Vec3::new(0.0, 1.0, 0.0));
            assert!((p.velocity.length() - 1.0).abs() < 0.001);
            assert!(p.velocity.y >= 0.0);
        }
    }

    #[test]
    fn test_deep_generations_take_minimum_values() {
        let mut e = emitter();
        let idx = e.create_particle(12, Some(Vec3::ZERO), Some(Vec3::ONE)).unwrap();
        let p = &e.particles()[idx];
        assert_eq!(p.lifetime, 0.15);
        assert_eq!(p.speed, 0.1);
        assert_eq!(p.size, 5.0);
        assert_eq!(p.emit_rate, 15.0);
        assert_eq!(p.color, Vec3::ONE);
    }

    #[test]
    fn test_capacity_is_respected() {
        let config = ParticleConfig::default().with_capacity(3);
        let mut e = Emitter::fountain(config, 1.0, 1);
        for _ in 0..3 {
            assert!(e.create_particle(0, None, None).is_some());
        }
        assert!(e.create_particle(0, None, None).is_none());
        e.update(0.01);
        assert_eq!(e.len(), 3);
    }

    #[test]
    fn test_expired_particles_are_swap_removed() {
        let mut e = emitter();
        e.spawn(resting(1.0, 1.0));
        e.spawn(resting(2.0, 10.0));
        e.spawn(resting(3.0, 10.0));

        e.update(2.0);

        // The last particle took the evicted one's slot
        assert_eq!(e.particles()[0].size, 3.0);
        assert_eq!(e.particles()[1].size, 2.0);
        assert!(e.particles().iter().all(|p| p.size != 1.0));
    }

    #[test]
    fn test_grounded_parent_emits_child() {
        let mut e = emitter();
        let parent = resting(7.0, 100.0)
            .with_position(Vec3::new(0.5, 0.0, 0.5))
            .with_color(Vec3::new(0.2, 0.4, 0.6));
        e.spawn(parent);

        e.update(0.2);

        // parent, child, then the new root particle
        assert_eq!(e.len(), 3);
        let child = &e.particles()[1];
        assert_eq!(child.level, 1);
        assert_eq!(child.color, Vec3::new(0.2, 0.4, 0.6));
        assert_eq!(child.birth, 0.2);
        assert_eq!(e.particles()[0].prev_emit, 0.2);
        assert_eq!(e.particles()[2].level, 0);
    }

    #[test]
    fn test_child_moves_in_the_update_that_spawns_it() {
        let mut e = emitter();
        let origin = Vec3::new(0.5, 0.0, 0.5);
        e.spawn(resting(7.0, 100.0).with_position(origin));

        e.update(0.2);

        let child = &e.particles()[1];
        assert_eq!(child.level, 1);
        assert_ne!(child.position, origin);
        // One step of dt = 0.2 at the child's speed, at most
        let moved = (child.position - origin).length();
        assert!(moved > 0.0 && moved <= child.speed * 0.2 + 0.0001);
    }

    #[test]
    fn test_grounded_parent_waits_for_emit_interval() {
        let mut e = emitter();
        e.spawn(resting(7.0, 100.0));
        e.update(0.05);
        // Only the root particle was added
        assert_eq!(e.len(), 2);
        assert_eq!(e.particles()[1].level, 0);
    }

    #[test]
    fn test_particles_eventually_ground() {
        let mut e = emitter();
        e.create_particle(0, None, None);
        let mut t = 0.0;
        while t < 6.0 {
            t += 1.0 / 60.0;
            e.update(t);
        }
        for p in e.particles().iter().filter(|p| p.grounded) {
            assert_eq!(p.position.y, 0.0);
        }
        assert!(e.particles().iter().all(|p| p.position.y >= 0.0));
    }

    #[test]
    fn test_reset_clears_pool() {
        let mut e = emitter();
        e.update(0.5);
        e.update(1.0);
        assert!(!e.is_empty());
        e.reset();
        assert!(e.is_empty());
        e.update(1.1);
        assert_eq!(e.len(), 1);
    }
}
