//! Scene layer for Rift.
//!
//! A scene is a [`Stage`] (an arena [`NodeTree`] plus pointer routing,
//! background colour and timers) driven by a [`SceneBehavior`]. Scenes are
//! stacked by the [`SceneManager`], which sequences their transitions.
//!
//! Nodes carry geometry, enablement, tint and two tweened channels
//! (position and alpha). Per-node logic lives in [`Behavior`]s; nodes that
//! take part in hit-testing also implement [`Interactive`].
//!
//! Asynchronous work (tweens, delays, transitions) reports through
//! [`Completion`] values that are polled from later updates.

mod behavior;
mod completion;
mod error;
mod id;
mod manager;
mod navigation;
mod node;
mod scene;
mod stage;
mod tree;
pub mod widgets;

#[cfg(test)]
mod testing;

pub use behavior::{unsupported_hook, AsAny, Behavior, DrawCx, Interactive, NodeCx};
pub use completion::{Completion, CompletionState, Resolver};
pub use error::SceneError;
pub use id::NodeId;
pub use manager::SceneManager;
pub use navigation::{NavRequest, Navigation};
pub use node::Node;
pub use scene::{Scene, SceneBehavior, SceneContext};
pub use stage::{Sequence, Stage};
pub use tree::NodeTree;

/// Everything a scene or node implementation usually needs.
pub mod prelude {
    pub use crate::widgets::{button_node, Button, Label};
    pub use crate::{
        Behavior, Completion, DrawCx, Interactive, Node, NodeCx, NodeId, NodeTree, Scene, SceneBehavior,
        SceneContext, Sequence, Stage,
    };

    pub use rift_engine::coords::{Rect, Vec2};
    pub use rift_engine::interp::Easing;
    pub use rift_engine::paint::{Color, Rgb};
    pub use rift_engine::render::Painter;
    pub use rift_engine::text::{Align, Font, TextParams};
    pub use rift_engine::time::Tick;
}
