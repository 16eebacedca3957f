//! Screen-space sprites
//!
//! A [`Sprite`] is a quad in normalized device coordinates spanning
//! `position +- scale`, rotated about its center. It keeps just enough mouse
//! state to be dragged around and resized with the wheel.

use spacerocks_math::Vec2;

/// Wheel scaling never shrinks a sprite below this half-extent
pub const MIN_SPRITE_SCALE: f32 = 0.01;

/// A rotated quad with drag state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// Center in NDC
    pub position: Vec2,
    /// Half-extents before rotation
    pub scale: Vec2,
    /// Counter-clockwise rotation in degrees
    pub rotation: f32,
    /// Where the current drag started
    pub mouse_down: Vec2,
    /// Sprite position when the current drag started
    pub old_position: Vec2,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            mouse_down: Vec2::ZERO,
            old_position: Vec2::ZERO,
        }
    }
}

impl Sprite {
    /// Create a sprite at `position` with half-extents `scale`
    pub fn new(position: Vec2, scale: Vec2) -> Self {
        Self {
            position,
            scale,
            ..Default::default()
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    /// Convert a point into the sprite's unrotated local frame
    fn to_local(&self, point: Vec2) -> Vec2 {
        (point - self.position).rotated(-self.rotation)
    }

    /// Corners counter-clockwise from the lower left
    pub fn corners(&self) -> [Vec2; 4] {
        let (sx, sy) = (self.scale.x, self.scale.y);
        [
            Vec2::new(-sx, -sy),
            Vec2::new(sx, -sy),
            Vec2::new(sx, sy),
            Vec2::new(-sx, sy),
        ]
        .map(|c| self.position + c.rotated(self.rotation))
    }

    /// Closed loop of corners for drawing an outline
    pub fn outline(&self) -> [Vec2; 5] {
        let [a, b, c, d] = self.corners();
        [a, b, c, d, a]
    }

    /// Whether the NDC point `(x, y)` lies on the sprite
    pub fn hit(&self, x: f32, y: f32) -> bool {
        self.contains(Vec2::new(x, y))
    }

    fn contains(&self, point: Vec2) -> bool {
        let local = self.to_local(point);
        local.x.abs() <= self.scale.x.abs() && local.y.abs() <= self.scale.y.abs()
    }

    /// Begin a drag at `(x, y)`
    pub fn down(&mut self, x: f32, y: f32) {
        self.mouse_down = Vec2::new(x, y);
        self.old_position = self.position;
    }

    /// Continue a drag: follow the mouse relative to where it went down
    pub fn drag(&mut self, x: f32, y: f32) {
        self.position = self.old_position + (Vec2::new(x, y) - self.mouse_down);
    }

    /// Grow or shrink by 10% per wheel notch
    pub fn wheel(&mut self, spin: f32) {
        let factor = 1.0 + spin * 0.1;
        let scaled = self.scale * factor;
        self.scale = Vec2::new(scaled.x.max(MIN_SPRITE_SCALE), scaled.y.max(MIN_SPRITE_SCALE));
    }

    /// Whether the two quads overlap
    ///
    /// Tests each sprite's corners against the other and falls back to
    /// comparing centers, which catches a sprite fully inside the other.
    pub fn intersects(&self, other: &Sprite) -> bool {
        self.position == other.position
            || self.corners().iter().any(|&c| other.contains(c))
            || other.corners().iter().any(|&c| self.contains(c))
    }
}
