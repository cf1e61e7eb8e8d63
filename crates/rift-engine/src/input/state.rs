use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, MouseButton, PointerButtonEvent};

/// What is held and where the pointer is, right now.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    /// Physical window pixels; `None` while the pointer is outside.
    pub pointer_pos: Option<Vec2>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the state, recording any edge in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // A release that happens while unfocused is never seen.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some(Vec2::new(x, y));
                frame.pointer_moved = true;
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
                frame.pointer_moved = true;
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, touch }) => {
                self.pointer_pos = Some(Vec2::new(x, y));

                match state {
                    ButtonState::Pressed => {
                        if self.buttons_down.insert(button) {
                            frame.buttons_pressed.insert(button);
                            frame.touch_pressed |= touch;
                        }
                    }
                    ButtonState::Released => {
                        if self.buttons_down.remove(&button) {
                            frame.buttons_released.insert(button);
                        }
                    }
                }
            }
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}
