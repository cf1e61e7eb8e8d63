use std::any::Any;

use rift_engine::coords::Vec2;
use rift_engine::interp::Easing;
use rift_engine::render::Painter;
use rift_engine::time::Tick;

use crate::completion::Completion;
use crate::id::NodeId;
use crate::node::Node;
use crate::tree::NodeTree;

/// Downcasting support for boxed behaviors.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-node logic attached to a [`Node`] in a [`NodeTree`].
///
/// `update` runs before the node's own tweens and before its children.
/// `draw` runs before the children, `draw_over` after them.
pub trait Behavior<C>: AsAny {
    fn update(&mut self, _cx: &mut NodeCx<'_, C>) {}

    fn draw(&self, _cx: &mut DrawCx<'_, '_, C>) {}

    fn draw_over(&self, _cx: &mut DrawCx<'_, '_, C>) {}

    /// Pointer hooks, for nodes that take part in hit-testing.
    fn interactive(&mut self) -> Option<&mut dyn Interactive<C>> {
        None
    }
}

/// Pointer hooks of an interactive node.
///
/// Every hook is required: a node that cannot meaningfully react to one
/// should call [`unsupported_hook`] from it.
///
/// A node whose [`accepts_press`](Interactive::accepts_press) is false is
/// hovered and blurred but never pressed, so its `on_mouse_down` and
/// `on_mouse_up` are unreachable.
pub trait Interactive<C> {
    fn accepts_press(&self) -> bool {
        true
    }


    /// The pointer entered the node. `mouse_down` is true when the button
    /// was already held.
    fn on_hover(&mut self, cx: &mut NodeCx<'_, C>, mouse_down: bool);
    fn on_blur(&mut self, cx: &mut NodeCx<'_, C>);
    fn on_mouse_down(&mut self, cx: &mut NodeCx<'_, C>);
    /// Release over a node that was pressed and is still hovered.
    fn on_mouse_up(&mut self, cx: &mut NodeCx<'_, C>);
}

/// Reports a hook an interactive node was never meant to receive.
#[track_caller]
pub fn unsupported_hook(node: NodeId, hook: &str) -> ! {
    log::error!("{node} does not handle {hook}");
    panic!("{node}: unsupported interactive hook {hook}");
}

/// Mutable view handed to update and pointer hooks.
pub struct NodeCx<'a, C> {
    pub id: NodeId,
    pub tree: &'a mut NodeTree<C>,
    pub ctx: &'a mut C,
    pub tick: Tick,
}

impl<C: 'static> NodeCx<'_, C> {
    pub fn node(&self) -> Option<&Node> {
        self.tree.node(self.id)
    }

    pub fn node_mut(&mut self) -> Option<&mut Node> {
        self.tree.node_mut(self.id)
    }

    pub fn top_left(&self) -> Vec2 {
        self.tree.top_left(self.id)
    }

    pub fn origin(&self) -> Vec2 {
        self.tree.origin(self.id)
    }

    pub fn move_to(&mut self, to: Vec2, duration: f64, easing: Easing) -> Completion {
        self.tree.move_to(self.id, to, duration, easing)
    }

    pub fn move_by(&mut self, by: Vec2, duration: f64, easing: Easing) -> Completion {
        self.tree.move_by(self.id, by, duration, easing)
    }

    pub fn fade(&mut self, alpha: u8, duration: f64, easing: Easing) -> Completion {
        self.tree.fade(self.id, alpha, duration, easing)
    }
}

/// Read-only view handed to draw hooks.
pub struct DrawCx<'a, 'p, C> {
    pub id: NodeId,
    pub tree: &'a NodeTree<C>,
    pub ctx: &'a C,
    pub painter: &'a mut Painter<'p>,
    pub tick: Tick,
}

impl<C: 'static> DrawCx<'_, '_, C> {
    pub fn node(&self) -> Option<&Node> {
        self.tree.node(self.id)
    }

    pub fn top_left(&self) -> Vec2 {
        self.tree.top_left(self.id)
    }

    pub fn absolute_origin(&self) -> Vec2 {
        self.tree.absolute_origin(self.id)
    }

    pub fn size(&self) -> Vec2 {
        self.node().map(|n| n.size).unwrap_or_default()
    }
}
