//! What the frame loop hands to the game each frame, and what it expects back.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
