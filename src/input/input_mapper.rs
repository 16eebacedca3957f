//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like Exit and Restart.
//! Arrow keys are NOT mapped here - they go through the key repeater.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by single key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Restart the game or reset the demo (R key)
    Restart,
    /// Fire the cannon (F key)
    Fire,
    /// Toggle fullscreen mode (F11)
    ToggleFullscreen,
}

impl InputAction {
    /// Key name shown in the bindings log
    pub fn key_name(self) -> &'static str {
        match self {
            InputAction::Exit => "Esc",
            InputAction::Restart => "R",
            InputAction::Fire => "F",
            InputAction::ToggleFullscreen => "F11",
        }
    }
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` for arrows and unbound keys
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::Restart),
            KeyCode::KeyF => Some(InputAction::Fire),
            KeyCode::F11 => Some(InputAction::ToggleFullscreen),
            _ => None,
        }
    }

    /// Log an app's key and mouse bindings at startup
    pub fn log_bindings(app: &str, bindings: &[(&str, &str)]) {
        log::info!("{} controls:", app);
        for (input, effect) in bindings {
            log::info!("  {:<12} {}", input, effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_arrow_keys_not_mapped() {
        for key in [KeyCode::ArrowUp, KeyCode::ArrowDown, KeyCode::ArrowLeft, KeyCode::ArrowRight] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Pressed),
            Some(InputAction::Restart)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed),
            Some(InputAction::Fire)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::F11, ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
    }

    #[test]
    fn test_key_names() {
        assert_eq!(InputAction::Exit.key_name(), "Esc");
        assert_eq!(InputAction::Fire.key_name(), "F");
    }
}
