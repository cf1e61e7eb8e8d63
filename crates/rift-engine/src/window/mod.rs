//! The event loop and the single game window.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
