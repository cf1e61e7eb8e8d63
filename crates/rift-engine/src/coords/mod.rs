//! Coordinate and geometry types shared by the renderer and the node graph.
//!
//! Canonical CPU space:
//! - Logical screen pixels (the fixed 512x288 game surface)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The window is letterboxed around the logical screen; see [`Letterbox`].

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::{Letterbox, Viewport};
