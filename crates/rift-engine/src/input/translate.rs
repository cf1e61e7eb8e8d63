use winit::event::{ElementState, MouseButton as WinitMouseButton, TouchPhase, WindowEvent};

use super::{ButtonState, InputEvent, InputState, MouseButton, PointerButtonEvent};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Positions stay in physical pixels; the frame loop maps them into the
/// letterboxed logical screen. Returns `None` for events the game ignores.
pub(crate) fn translate_window_event(state: &InputState, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),

        WindowEvent::MouseInput { state: st, button, .. } => {
            // winit 0.30 does not expose a cursor query; use the tracked position.
            let pos = state.pointer_pos.unwrap_or_default();
            Some(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: match st {
                    ElementState::Pressed => ButtonState::Pressed,
                    ElementState::Released => ButtonState::Released,
                },
                x: pos.x,
                y: pos.y,
                touch: false,
            }))
        }

        WindowEvent::Touch(touch) => {
            let (x, y) = (touch.location.x as f32, touch.location.y as f32);
            let state = match touch.phase {
                TouchPhase::Started => ButtonState::Pressed,
                TouchPhase::Ended | TouchPhase::Cancelled => ButtonState::Released,
                TouchPhase::Moved => return Some(InputEvent::PointerMoved { x, y }),
            };
            Some(InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                x,
                y,
                touch: true,
            }))
        }

        _ => None,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
