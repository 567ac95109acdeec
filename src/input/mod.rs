use std::collections::HashSet;
use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

/// Key that stands in for the "start game" button on native builds
pub const START_KEY: KeyCode = KeyCode::Enter;

/// Held-key state, updated by window events and read once per frame
#[derive(Debug, Default)]
pub struct InputState {
    keys_pressed: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
        }
    }

    pub fn process_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_pressed.insert(key);
            }
            ElementState::Released => {
                self.keys_pressed.remove(&key);
            }
        }
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Forget every held key (focus loss)
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
    }
}

/// Logical movement keys sampled for one frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementKeys {
    /// Arrow up: towards -Z
    pub up: bool,
    /// Arrow down: towards +Z
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// W or Space
    pub ascend: bool,
    /// S
    pub descend: bool,
}

/// Sample the movement keys from the raw key state
/// Pure function - maps physical keys to logical movement intents
pub fn sample_movement_keys(input: &InputState) -> MovementKeys {
    MovementKeys {
        up: input.is_key_pressed(KeyCode::ArrowUp),
        down: input.is_key_pressed(KeyCode::ArrowDown),
        left: input.is_key_pressed(KeyCode::ArrowLeft),
        right: input.is_key_pressed(KeyCode::ArrowRight),
        ascend: input.is_key_pressed(KeyCode::KeyW) || input.is_key_pressed(KeyCode::Space),
        descend: input.is_key_pressed(KeyCode::KeyS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_round_trip() {
        let mut input = InputState::new();
        input.process_key(KeyCode::ArrowUp, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::ArrowUp));

        input.process_key(KeyCode::ArrowUp, ElementState::Released);
        assert!(!input.is_key_pressed(KeyCode::ArrowUp));
    }

    #[test]
    fn space_and_w_both_ascend() {
        let mut input = InputState::new();
        input.process_key(KeyCode::Space, ElementState::Pressed);
        assert!(sample_movement_keys(&input).ascend);

        input.process_key(KeyCode::Space, ElementState::Released);
        input.process_key(KeyCode::KeyW, ElementState::Pressed);
        let keys = sample_movement_keys(&input);
        assert!(keys.ascend);
        assert!(!keys.descend);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut input = InputState::new();
        input.process_key(KeyCode::KeyQ, ElementState::Pressed);
        assert_eq!(sample_movement_keys(&input), MovementKeys::default());
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputState::new();
        input.process_key(KeyCode::ArrowLeft, ElementState::Pressed);
        input.process_key(KeyCode::KeyS, ElementState::Pressed);
        input.clear();
        assert_eq!(sample_movement_keys(&input), MovementKeys::default());
    }
}
