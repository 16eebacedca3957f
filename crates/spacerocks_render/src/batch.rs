//! Collecting shape instances for a frame
//!
//! [`ShapeBatch`] turns game and simulation objects into [`ShapeInstance`]s.
//! Shapes are drawn in the order they are pushed, so push backgrounds first.

use spacerocks_core::Sprite;
use spacerocks_math::{Vec2, Vec3};
use spacerocks_physics::{Asteroid, Cylinder, Particle, Planet};

use crate::pipeline::{ShapeInstance, ShapeKind};

/// Instances for one frame
#[derive(Clone, Debug, Default)]
pub struct ShapeBatch {
    instances: Vec<ShapeInstance>,
}

fn rgba(color: Vec3, alpha: f32) -> [f32; 4] {
    [color.x, color.y, color.z, alpha]
}

fn flat(p: Vec2) -> [f32; 3] {
    [p.x, p.y, 0.0]
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame, keeping the allocation
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: ShapeInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[ShapeInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// A world-sized rectangle
    pub fn quad(&mut self, center: [f32; 3], half_size: [f32; 2], rotation: f32, color: [f32; 4]) {
        self.push(ShapeInstance::new(ShapeKind::Quad, center, half_size, color).with_rotation(rotation));
    }

    /// A world-sized filled circle
    pub fn disk(&mut self, center: [f32; 3], radius: f32, color: [f32; 4]) {
        self.push(ShapeInstance::new(ShapeKind::Disk, center, [radius, radius], color));
    }

    /// A world-sized circle outline
    pub fn ring(&mut self, center: [f32; 3], radius: f32, color: [f32; 4]) {
        self.push(ShapeInstance::new(ShapeKind::Ring, center, [radius, radius], color));
    }

    /// A filled circle `diameter` pixels across
    pub fn dot(&mut self, center: [f32; 3], diameter: f32, color: [f32; 4]) {
        let r = diameter / 2.0;
        self.push(ShapeInstance::new(ShapeKind::Disk, center, [r, r], color).pixel_sized());
    }

    /// A 2D line segment `width` world units thick
    pub fn line(&mut self, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
        let d = b - a;
        let center = (a + b) * 0.5;
        let angle = d.y.atan2(d.x);
        self.quad(flat(center), [d.length() / 2.0, width / 2.0], angle, color);
    }

    /// A sprite's quad
    pub fn sprite(&mut self, sprite: &Sprite, color: [f32; 4]) {
        self.quad(
            flat(sprite.position),
            sprite.scale.to_array(),
            sprite.rotation.to_radians(),
            color,
        );
    }

    /// A highlight around a sprite
    pub fn sprite_outline(&mut self, sprite: &Sprite, width: f32, color: [f32; 4]) {
        for pair in sprite.outline().windows(2) {
            self.line(pair[0], pair[1], width, color);
        }
    }

    /// A planet's disk with a faint ring showing its gravity reach
    pub fn planet(&mut self, planet: &Planet, color: [f32; 4]) {
        let center = flat(planet.position);
        let [r, g, b, _] = color;
        self.ring(center, planet.gravity_reach, [r, g, b, 0.15]);
        self.disk(center, planet.radius(), color);
    }

    pub fn asteroid(&mut self, asteroid: &Asteroid, color: [f32; 4]) {
        self.disk(flat(asteroid.position), asteroid.scale, color);
    }

    /// A particle as a screen-sized dot in its own color
    pub fn particle(&mut self, particle: &Particle) {
        self.dot(particle.position.to_array(), particle.size, rgba(particle.color, 1.0));
    }

    /// A Y-up cylinder seen from the side: a body billboard plus its cap
    pub fn cylinder(&mut self, cylinder: &Cylinder, ground: f32) {
        let base = cylinder.location;
        let half_height = cylinder.height / 2.0;
        let color = rgba(cylinder.color, 1.0);
        self.quad(
            [base.x, ground + half_height, base.z],
            [cylinder.radius, half_height],
            0.0,
            color,
        );
        let cap = rgba(cylinder.color * 0.8, 1.0);
        self.disk([base.x, cylinder.top(ground), base.z], cylinder.radius, cap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_uses_radians() {
        let mut sprite = Sprite::new(Vec2::new(0.5, 0.0), Vec2::splat(0.1));
        sprite.set_rotation(90.0);
        let mut batch = ShapeBatch::new();
        batch.sprite(&sprite, [1.0; 4]);

        let i = batch.instances()[0];
        assert_eq!(i.center, [0.5, 0.0, 0.0]);
        assert!((i.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(i.kind, ShapeKind::Quad as u32);
    }

    #[test]
    fn test_outline_is_four_lines() {
        let sprite = Sprite::new(Vec2::ZERO, Vec2::splat(0.1));
        let mut batch = ShapeBatch::new();
        batch.sprite_outline(&sprite, 0.01, [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(batch.len(), 4);
        // Each side is as long as the sprite
        assert!(batch.instances().iter().all(|i| (i.half_size[0] - 0.1).abs() < 1e-6));
    }

    #[test]
    fn test_line_geometry() {
        let mut batch = ShapeBatch::new();
        batch.line(Vec2::new(0.0, 0.0), Vec2::new(0.0, 2.0), 0.1, [1.0; 4]);
        let i = batch.instances()[0];
        assert_eq!(i.center, [0.0, 1.0, 0.0]);
        assert!((i.half_size[0] - 1.0).abs() < 1e-6);
        assert!((i.half_size[1] - 0.05).abs() < 1e-6);
        assert!((i.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_particle_is_pixel_sized() {
        let p = Particle::new(0, 0.0, 1.0, 1.0, 8.0, 10.0).with_color(Vec3::new(1.0, 0.5, 0.0));
        let mut batch = ShapeBatch::new();
        batch.particle(&p);
        let i = batch.instances()[0];
        assert_eq!(i.pixel_sized, 1);
        assert_eq!(i.half_size, [4.0, 4.0]);
        assert_eq!(i.color, [1.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn test_planet_draws_reach_then_body() {
        let planet = Planet::new(Vec2::new(0.2, 0.4), Vec2::splat(0.2));
        let mut batch = ShapeBatch::new();
        batch.planet(&planet, [0.2, 0.4, 1.0, 1.0]);
        assert_eq!(batch.instances()[0].kind, ShapeKind::Ring as u32);
        assert_eq!(batch.instances()[1].kind, ShapeKind::Disk as u32);
        assert_eq!(batch.instances()[1].half_size, [0.2, 0.2]);
    }

    #[test]
    fn test_cylinder_cap_at_top() {
        let cyl = Cylinder::new(0.5, 0.25, Vec3::ONE, Vec3::new(-0.3, 0.0, 0.6));
        let mut batch = ShapeBatch::new();
        batch.cylinder(&cyl, 0.0);
        assert_eq!(batch.instances()[0].center, [-0.3, 0.25, 0.6]);
        assert_eq!(batch.instances()[1].center, [-0.3, 0.5, 0.6]);
    }
}
