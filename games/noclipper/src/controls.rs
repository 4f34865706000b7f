//! Browser `keyCode` values mapped to game actions.

pub const KEY_ESCAPE: u32 = 27;
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_A: u32 = 65;
pub const KEY_D: u32 = 68;
pub const KEY_E: u32 = 69;
pub const KEY_Q: u32 = 81;
pub const KEY_W: u32 = 87;
pub const KEY_X: u32 = 88;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    MoveLeft,
    MoveRight,
    Quit,
    /// Reload the current level, keeping loot.
    Retry,
    /// Show or hide the underlayer.
    ToggleLayer,
}

pub fn action_for_key(key_code: u32) -> Option<Action> {
    match key_code {
        KEY_W | KEY_UP => Some(Action::Jump),
        KEY_A | KEY_LEFT => Some(Action::MoveLeft),
        KEY_D | KEY_RIGHT => Some(Action::MoveRight),
        KEY_Q | KEY_ESCAPE => Some(Action::Quit),
        KEY_X => Some(Action::Retry),
        KEY_E => Some(Action::ToggleLayer),
        _ => None,
    }
}

/// Releasing any horizontal movement key stops the character.
pub fn stops_horizontal(key_code: u32) -> bool {
    matches!(key_code, KEY_A | KEY_D | KEY_LEFT | KEY_RIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_agree() {
        assert_eq!(action_for_key(KEY_W), action_for_key(KEY_UP));
        assert_eq!(action_for_key(KEY_A), Some(Action::MoveLeft));
        assert_eq!(action_for_key(KEY_RIGHT), Some(Action::MoveRight));
    }

    #[test]
    fn command_keys() {
        assert_eq!(action_for_key(KEY_Q), Some(Action::Quit));
        assert_eq!(action_for_key(KEY_ESCAPE), Some(Action::Quit));
        assert_eq!(action_for_key(KEY_X), Some(Action::Retry));
        assert_eq!(action_for_key(KEY_E), Some(Action::ToggleLayer));
        assert_eq!(action_for_key(32), None);
    }

    #[test]
    fn only_horizontal_keys_stop_on_release() {
        assert!(stops_horizontal(KEY_A));
        assert!(stops_horizontal(KEY_LEFT));
        assert!(!stops_horizontal(KEY_W));
        assert!(!stops_horizontal(KEY_E));
    }
}
