//! Held-key repetition
//!
//! Controls:
//! - Arrow keys: one step on press, then one step per frame after the delay

use winit::keyboard::KeyCode;

/// Seconds a key must be held before it starts repeating
pub const DEFAULT_REPEAT_DELAY: f32 = 0.2;

/// Tracks the most recently pressed key and repeats it while held
#[derive(Clone, Debug)]
pub struct KeyRepeat {
    held: Option<KeyCode>,
    pressed_at: f32,
    pub delay: f32,
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT_DELAY)
    }
}

impl KeyRepeat {
    pub fn new(delay: f32) -> Self {
        Self {
            held: None,
            pressed_at: 0.0,
            delay,
        }
    }

    /// Record a key press at `now` seconds; the press itself fires once
    ///
    /// Pressing a second key takes over from the first.
    pub fn press(&mut self, key: KeyCode, now: f32) -> KeyCode {
        self.held = Some(key);
        self.pressed_at = now;
        key
    }

    /// Stop repeating `key` if it is the held key
    pub fn release(&mut self, key: KeyCode) {
        if self.held == Some(key) {
            self.held = None;
        }
    }

    /// The held key, once it has been down longer than the delay
    pub fn poll(&self, now: f32) -> Option<KeyCode> {
        self.held.filter(|_| now - self.pressed_at > self.delay)
    }

    pub fn held(&self) -> Option<KeyCode> {
        self.held
    }

    /// Forget the held key (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held = None;
    }
}

/// Maps arrow keys to unit directions
pub struct ArrowPad;

impl ArrowPad {
    /// Direction for an arrow key, `+y` up
    pub fn direction(key: KeyCode) -> Option<(f32, f32)> {
        match key {
            KeyCode::ArrowLeft => Some((-1.0, 0.0)),
            KeyCode::ArrowRight => Some((1.0, 0.0)),
            KeyCode::ArrowDown => Some((0.0, -1.0)),
            KeyCode::ArrowUp => Some((0.0, 1.0)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_repeat_before_delay() {
        let mut keys = KeyRepeat::default();
        assert_eq!(keys.press(KeyCode::ArrowLeft, 1.0), KeyCode::ArrowLeft);
        assert_eq!(keys.poll(1.1), None);
        assert_eq!(keys.poll(1.15), None);
        assert_eq!(keys.poll(1.25), Some(KeyCode::ArrowLeft));
    }

    #[test]
    fn test_release_stops_repeat() {
        let mut keys = KeyRepeat::default();
        keys.press(KeyCode::ArrowUp, 0.0);
        keys.release(KeyCode::ArrowUp);
        assert_eq!(keys.poll(5.0), None);
    }

    #[test]
    fn test_releasing_other_key_keeps_repeat() {
        let mut keys = KeyRepeat::default();
        keys.press(KeyCode::ArrowUp, 0.0);
        keys.press(KeyCode::ArrowRight, 1.0);
        keys.release(KeyCode::ArrowUp);
        assert_eq!(keys.held(), Some(KeyCode::ArrowRight));
        // The delay restarts with the new key
        assert_eq!(keys.poll(1.1), None);
        assert_eq!(keys.poll(1.3), Some(KeyCode::ArrowRight));
    }

    #[test]
    fn test_arrow_directions() {
        assert_eq!(ArrowPad::direction(KeyCode::ArrowLeft), Some((-1.0, 0.0)));
        assert_eq!(ArrowPad::direction(KeyCode::ArrowUp), Some((0.0, 1.0)));
        assert_eq!(ArrowPad::direction(KeyCode::KeyW), None);
    }
}
