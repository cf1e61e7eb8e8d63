//! Beyond the Rift.
//!
//! Card tables and deck construction, the shared [`state::GameState`], the
//! turn [`phase`] machine, the gameplay nodes and every scene, plus the
//! [`app::RiftApp`] that drives them from the engine's frame loop.

pub mod app;
pub mod assets;
pub mod cards;
pub mod config;
pub mod context;
pub mod decks;
pub mod nodes;
pub mod phase;
pub mod rng;
pub mod scenes;
pub mod state;

/// Logical screen size in pixels.
pub const SCREEN_WIDTH: f32 = 512.0;
pub const SCREEN_HEIGHT: f32 = 288.0;
