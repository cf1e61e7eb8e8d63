use std::collections::HashSet;

use super::types::MouseButton;

/// Button edges seen since the last frame.
///
/// Held buttons and the pointer position live in [`InputState`](super::InputState);
/// this only says what changed.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
    /// The pointer moved, entered or left.
    pub pointer_moved: bool,
    /// A press this frame came from a touch, so no hover preceded it.
    pub touch_pressed: bool,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.pointer_moved = false;
        self.touch_pressed = false;
    }

    #[inline]
    pub fn pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    #[inline]
    pub fn released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }
}
