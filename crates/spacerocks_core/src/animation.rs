//! Time-driven sprite animation
//!
//! Sprites can be interpolated between two keyframe sprites or made to
//! "breathe" by swinging their height on a sine wave.

use std::f32::consts::PI;

use spacerocks_math::Vec2;

use crate::Sprite;

/// Blend factor swinging between 0 and 1 on a sine wave
///
/// Starts at 0.5, reaches 1 after `duration / 2` seconds and 0 after
/// `3 * duration / 2`.
pub fn sine_blend(elapsed: f32, duration: f32) -> f32 {
    (1.0 + (PI * elapsed / duration).sin()) / 2.0
}

/// A sprite that moves between two keyframe sprites
#[derive(Clone, Debug, PartialEq)]
pub struct Lerper {
    /// Seconds per swing of the blend factor
    pub duration: f32,
}

impl Default for Lerper {
    fn default() -> Self {
        Self { duration: 1.0 }
    }
}

impl Lerper {
    pub fn new(duration: f32) -> Self {
        Self { duration }
    }

    /// Blend factor at `elapsed` seconds
    pub fn t(&self, elapsed: f32) -> f32 {
        sine_blend(elapsed, self.duration)
    }

    /// The in-between sprite: position and scale interpolated by `t`
    pub fn between(from: &Sprite, to: &Sprite, t: f32) -> Sprite {
        Sprite::new(from.position.lerp(to.position, t), from.scale.lerp(to.scale, t))
    }

    /// The in-between sprite at `elapsed` seconds
    pub fn at(&self, from: &Sprite, to: &Sprite, elapsed: f32) -> Sprite {
        Self::between(from, to, self.t(elapsed))
    }
}

/// Vertical stretching on a sine wave
#[derive(Clone, Debug, PartialEq)]
pub struct Breath {
    /// Seconds per full breath
    pub duration: f32,
    /// Smallest vertical factor
    pub bias: f32,
    /// How much the factor grows at the top of a breath
    pub amplitude: f32,
}

impl Default for Breath {
    fn default() -> Self {
        Self {
            duration: 2.0,
            bias: 1.0,
            amplitude: 0.5,
        }
    }
}

impl Breath {
    /// Vertical scale factor at `elapsed` seconds, in `[bias, bias + amplitude]`
    pub fn factor(&self, elapsed: f32) -> f32 {
        let angle = 2.0 * PI * elapsed / self.duration;
        self.bias + self.amplitude * (1.0 + angle.sin()) / 2.0
    }

    /// Scale `sprite` to `base` with its height breathing
    pub fn apply(&self, sprite: &mut Sprite, base: Vec2, elapsed: f32) {
        sprite.set_scale(Vec2::new(base.x, base.y * self.factor(elapsed)));
    }
}
