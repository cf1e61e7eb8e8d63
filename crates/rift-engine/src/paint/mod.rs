//! Paint model shared between the node graph and the sprite renderer.
//!
//! Scope:
//! - packed tint colours (`0xAABBGGRR`, the vertex colour format)
//! - opaque background colours (`Rgb`, 0-255 channels)
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::{Color, Rgb};
