//! Pointer and focus input, free of winit types outside `translate`.

mod frame;
mod state;
mod translate;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub(crate) use translate::translate_window_event;
pub use types::{ButtonState, InputEvent, MouseButton, PointerButtonEvent};
