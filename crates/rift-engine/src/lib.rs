//! The platform half of Beyond the Rift.
//!
//! A winit window driven by a continuous frame loop, a wgpu sprite renderer
//! fed by a CPU-side draw batch, bitmap-font text, texture atlases and the
//! small geometry, colour and timing types the scene layer builds on.

pub mod assets;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod interp;
pub mod logging;
pub mod paint;
pub mod render;
pub mod text;
pub mod time;
pub mod window;
