//! Stock behaviors shared by every scene.

mod button;
mod label;

pub use button::{button_node, Button};
pub use label::Label;
