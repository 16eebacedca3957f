//! Mouse dragging and wheel scaling of sprites
//!
//! Controls:
//! - Left drag: move the target
//! - Mouse wheel: grow/shrink the target
//! - Hover: reported so the app can outline the target

use spacerocks_core::Sprite;
use spacerocks_math::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixel scroll distance treated as one wheel notch
pub const PIXELS_PER_LINE: f32 = 40.0;

/// Something the mouse can grab, drag and resize
///
/// Coordinates are in the app's 2D world space (see
/// [`SpriteDragController::to_world`]).
pub trait DragTarget {
    fn hit(&self, x: f32, y: f32) -> bool;
    fn down(&mut self, x: f32, y: f32);
    fn drag(&mut self, x: f32, y: f32);
    fn wheel(&mut self, spin: f32);
}

impl DragTarget for Sprite {
    fn hit(&self, x: f32, y: f32) -> bool {
        Sprite::hit(self, x, y)
    }

    fn down(&mut self, x: f32, y: f32) {
        Sprite::down(self, x, y)
    }

    fn drag(&mut self, x: f32, y: f32) {
        Sprite::drag(self, x, y)
    }

    fn wheel(&mut self, spin: f32) {
        Sprite::wheel(self, spin)
    }
}

/// Forwards mouse events to a [`DragTarget`]
///
/// The world square `[-1, 1]` is fitted to the largest centered square of
/// the window, so the short axis spans `[-1, 1]` and the long axis extends
/// further.
pub struct SpriteDragController {
    width: f32,
    height: f32,
    cursor: Vec2,
    dragging: bool,
    hovering: bool,
}

impl SpriteDragController {
    pub fn new(width: u32, height: u32) -> Self {
        let mut controller = Self {
            width: 1.0,
            height: 1.0,
            cursor: Vec2::ZERO,
            dragging: false,
            hovering: false,
        };
        controller.resize(width, height);
        controller
    }

    /// Track the window size in physical pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }

    /// Convert a window pixel position (origin top-left) to world coordinates
    pub fn to_world(&self, x: f64, y: f64) -> Vec2 {
        let short = self.width.min(self.height);
        let nx = 2.0 * x as f32 / self.width - 1.0;
        let ny = 1.0 - 2.0 * y as f32 / self.height;
        Vec2::new(nx * self.width / short, ny * self.height / short)
    }

    /// Process cursor movement; returns whether the cursor is over the target
    pub fn cursor_moved<T: DragTarget>(&mut self, target: &mut T, position: PhysicalPosition<f64>) -> bool {
        self.cursor = self.to_world(position.x, position.y);
        if self.dragging {
            target.drag(self.cursor.x, self.cursor.y);
        }
        self.hovering = target.hit(self.cursor.x, self.cursor.y);
        self.hovering
    }

    /// Process a mouse button; returns whether a left press hit the target
    ///
    /// A left press anywhere starts a drag, so the target follows the mouse
    /// relative to where it went down.
    pub fn mouse_button<T: DragTarget>(&mut self, target: &mut T, button: MouseButton, state: ElementState) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        match state {
            ElementState::Pressed => {
                self.dragging = true;
                target.down(self.cursor.x, self.cursor.y);
                target.hit(self.cursor.x, self.cursor.y)
            }
            ElementState::Released => {
                self.dragging = false;
                false
            }
        }
    }

    /// Process a wheel event
    pub fn mouse_wheel<T: DragTarget>(&mut self, target: &mut T, delta: MouseScrollDelta) {
        let spin = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
        };
        if spin != 0.0 {
            target.wheel(spin);
        }
    }

    /// Last cursor position in world coordinates
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}
