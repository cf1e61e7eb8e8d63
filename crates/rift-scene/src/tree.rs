use std::cell::Cell;
use std::collections::HashMap;

use rift_engine::coords::{Rect, Vec2};
use rift_engine::interp::Easing;
use rift_engine::paint::Color;
use rift_engine::render::Painter;
use rift_engine::time::Tick;

use crate::behavior::{Behavior, DrawCx, Interactive, NodeCx};
use crate::completion::Completion;
use crate::id::NodeId;
use crate::node::{Node, Tween};

struct Slot<C> {
    node: Node,
    behavior: Option<Box<dyn Behavior<C>>>,
    interactive: bool,
    accepts_press: bool,
    // (epoch, absolute origin)
    memo: Cell<Option<(u64, Vec2)>>,
}

/// Arena of scene nodes rooted at a screen-sized root.
///
/// Nodes are spawned detached and become part of the scene once added under
/// a parent. A removed node stays in the arena and can be added again;
/// `despawn` frees it together with its descendants.
pub struct NodeTree<C> {
    slots: HashMap<NodeId, Slot<C>>,
    root: NodeId,
    epoch: u64,
}

impl<C: 'static> NodeTree<C> {
    pub fn new(size: Vec2) -> Self {
        let root = Node::new(size);
        let id = root.id;
        let mut slots = HashMap::new();
        slots.insert(id, Slot::new(root, None));
        Self { slots, root: id, epoch: 0 }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // ── structure ─────────────────────────────────────────────────────────

    pub fn spawn(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.slots.insert(id, Slot::new(node, None));
        id
    }

    pub fn spawn_with(&mut self, node: Node, behavior: impl Behavior<C>) -> NodeId {
        let id = node.id;
        self.slots.insert(id, Slot::new(node, Some(Box::new(behavior))));
        id
    }

    /// `spawn` followed by `add`.
    pub fn spawn_in(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.spawn(node);
        self.add(parent, id);
        id
    }

    /// `spawn_with` followed by `add`.
    pub fn spawn_in_with(&mut self, parent: NodeId, node: Node, behavior: impl Behavior<C>) -> NodeId {
        let id = self.spawn_with(node, behavior);
        self.add(parent, id);
        id
    }

    /// Re-parents `child` under `parent` as its last child and enables the
    /// whole subtree.
    pub fn add(&mut self, parent: NodeId, child: NodeId) {
        if !self.slots.contains_key(&parent) || !self.slots.contains_key(&child) {
            log::error!("add: {child} or {parent} does not exist");
            return;
        }
        if self.is_ancestor_or_self(child, parent) {
            log::error!("add: {child} cannot be placed under its own descendant {parent}");
            return;
        }

        self.detach(child);
        if let Some(slot) = self.slots.get_mut(&child) {
            slot.node.parent = Some(parent);
        }
        if let Some(slot) = self.slots.get_mut(&parent) {
            slot.node.children.push(child);
        }
        self.set_enabled(child, true);
        self.epoch += 1;
    }

    /// Detaches `child` from its parent and disables its subtree.
    pub fn remove(&mut self, child: NodeId) {
        self.set_enabled(child, false);
        self.detach(child);
    }

    /// Removes `id` and every descendant from the arena.
    pub fn despawn(&mut self, id: NodeId) {
        if id == self.root {
            log::error!("despawn: the root node cannot be despawned");
            return;
        }
        self.detach(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(slot) = self.slots.remove(&next) {
                pending.extend(slot.node.children);
            }
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.slots.get_mut(&child).and_then(|s| s.node.parent.take()) else {
            return;
        };
        if let Some(slot) = self.slots.get_mut(&parent) {
            slot.node.children.retain(|c| *c != child);
        }
        self.epoch += 1;
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.slots.get(&id).and_then(|s| s.node.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Sets enablement on `id` and all of its descendants.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(slot) = self.slots.get_mut(&next) {
                slot.node.enabled = enabled;
                pending.extend(slot.node.children.iter().copied());
            }
        }
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.node_mut(id) {
            node.visible = visible;
        }
    }

    // ── access ────────────────────────────────────────────────────────────

    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|s| &s.node)
    }

    /// Mutable access to `id`. Cached absolute origins are invalidated,
    /// since `size` and `anchor` may change through it.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(&id)?;
        self.epoch += 1;
        Some(&mut slot.node)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The behavior of `id` if it is a `T`.
    ///
    /// `None` while that behavior's own hooks are running.
    pub fn behavior<T: Behavior<C>>(&self, id: NodeId) -> Option<&T> {
        let behavior: &dyn Behavior<C> = &**self.slots.get(&id)?.behavior.as_ref()?;
        behavior.as_any().downcast_ref::<T>()
    }

    pub fn behavior_mut<T: Behavior<C>>(&mut self, id: NodeId) -> Option<&mut T> {
        let behavior: &mut dyn Behavior<C> = &mut **self.slots.get_mut(&id)?.behavior.as_mut()?;
        behavior.as_any_mut().downcast_mut::<T>()
    }

    /// Runs `f` with the `T` behavior of `id` and a context for its node.
    pub fn with_behavior<T, R>(
        &mut self,
        id: NodeId,
        ctx: &mut C,
        tick: Tick,
        f: impl FnOnce(&mut T, &mut NodeCx<'_, C>) -> R,
    ) -> Option<R>
    where
        T: Behavior<C>,
    {
        let mut boxed = self.slots.get_mut(&id)?.behavior.take()?;
        let behavior: &mut dyn Behavior<C> = &mut *boxed;
        let out = behavior
            .as_any_mut()
            .downcast_mut::<T>()
            .map(|b| f(b, &mut NodeCx { id, tree: self, ctx, tick }));
        self.restore(id, boxed);
        out
    }

    #[inline]
    pub fn is_interactive(&self, id: NodeId) -> bool {
        self.slots.get(&id).is_some_and(|s| s.interactive)
    }

    #[inline]
    pub fn accepts_press(&self, id: NodeId) -> bool {
        self.slots.get(&id).is_some_and(|s| s.accepts_press)
    }

    /// Runs `f` against the pointer hooks of `id`, if it has any.
    pub fn with_interactive(
        &mut self,
        id: NodeId,
        ctx: &mut C,
        tick: Tick,
        f: impl FnOnce(&mut dyn Interactive<C>, &mut NodeCx<'_, C>),
    ) {
        let Some(mut boxed) = self.slots.get_mut(&id).and_then(|s| s.behavior.take()) else {
            return;
        };
        if let Some(hooks) = boxed.interactive() {
            f(hooks, &mut NodeCx { id, tree: self, ctx, tick });
        }
        self.restore(id, boxed);
    }

    fn restore(&mut self, id: NodeId, behavior: Box<dyn Behavior<C>>) {
        if let Some(slot) = self.slots.get_mut(&id) {
            if slot.behavior.is_none() {
                slot.behavior = Some(behavior);
            }
        }
    }

    // ── geometry ──────────────────────────────────────────────────────────

    pub fn origin(&self, id: NodeId) -> Vec2 {
        self.node(id).map(|n| n.origin).unwrap_or_default()
    }

    /// Moves `id` immediately, abandoning any movement tween.
    pub fn set_origin(&mut self, id: NodeId, origin: Vec2) {
        if let Some(node) = self.node_mut(id) {
            node.movement = None;
            node.origin = origin;
            self.epoch += 1;
        }
    }

    /// The parent's top-left plus the relative origin; the root's origin as is.
    pub fn absolute_origin(&self, id: NodeId) -> Vec2 {
        let Some(slot) = self.slots.get(&id) else {
            return Vec2::zero();
        };
        if let Some((epoch, origin)) = slot.memo.get() {
            if epoch == self.epoch {
                return origin;
            }
        }
        let origin = match slot.node.parent {
            Some(parent) => self.top_left(parent) + slot.node.origin,
            None => slot.node.origin,
        };
        slot.memo.set(Some((self.epoch, origin)));
        origin
    }

    /// Absolute top-left: the origin shifted back by `anchor * (size - 1)`.
    pub fn top_left(&self, id: NodeId) -> Vec2 {
        let Some(node) = self.node(id) else {
            return Vec2::zero();
        };
        let shift = node.anchor.scale(Vec2::splat(1.0) - node.size).trunc();
        self.absolute_origin(id) + shift
    }

    pub fn bounds(&self, id: NodeId) -> Rect {
        let size = self.node(id).map(|n| n.size).unwrap_or_default();
        Rect::from_origin_size(self.top_left(id), size)
    }

    /// Nodes under `p` in pre-order.
    ///
    /// A node is reported when it is enabled, visible and contains `p`;
    /// only such nodes are descended into.
    pub fn nodes_at(&self, p: Vec2) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_at(self.root, p, &mut out);
        out
    }

    fn collect_at(&self, id: NodeId, p: Vec2, out: &mut Vec<NodeId>) {
        let Some(slot) = self.slots.get(&id) else { return };
        let node = &slot.node;
        if !node.enabled || !node.visible || !self.bounds(id).contains(p) {
            return;
        }
        out.push(id);
        for child in &node.children {
            self.collect_at(*child, p, out);
        }
    }

    // ── tweens ────────────────────────────────────────────────────────────

    /// Tweens the origin of `id` to `to`.
    ///
    /// A target equal to the current origin completes immediately and leaves
    /// any movement in flight alone. Otherwise that movement is abandoned,
    /// and zero duration jumps straight to `to`.
    pub fn move_to(&mut self, id: NodeId, to: Vec2, duration: f64, easing: Easing) -> Completion {
        let Some(node) = self.node_mut(id) else {
            log::warn!("move_to: {id} does not exist");
            return Completion::done();
        };
        if node.origin == to {
            return Completion::done();
        }
        node.movement = None;
        if duration <= 0.0 {
            node.origin = to;
            self.epoch += 1;
            return Completion::done();
        }
        let (completion, resolver) = Completion::pending();
        node.movement = Some(Tween::new(node.origin, to, duration, easing, resolver));
        completion
    }

    pub fn move_by(&mut self, id: NodeId, by: Vec2, duration: f64, easing: Easing) -> Completion {
        let to = self.origin(id) + by;
        self.move_to(id, to, duration, easing)
    }

    /// Tweens the alpha of `id`, with the same rules as [`Self::move_to`].
    pub fn fade(&mut self, id: NodeId, alpha: u8, duration: f64, easing: Easing) -> Completion {
        let Some(node) = self.node_mut(id) else {
            log::warn!("fade: {id} does not exist");
            return Completion::done();
        };
        if node.color.a() == alpha {
            return Completion::done();
        }
        node.fade = None;
        if duration <= 0.0 {
            node.color.set_a(alpha);
            return Completion::done();
        }
        let (completion, resolver) = Completion::pending();
        node.fade = Some(Tween::new(node.color.a(), alpha, duration, easing, resolver));
        completion
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Updates every enabled node, parents before children.
    pub fn update(&mut self, ctx: &mut C, tick: Tick) {
        self.epoch += 1;
        self.update_node(self.root, ctx, tick);
    }

    fn update_node(&mut self, id: NodeId, ctx: &mut C, tick: Tick) {
        let Some(slot) = self.slots.get_mut(&id) else { return };
        if !slot.node.enabled {
            return;
        }

        if let Some(mut behavior) = slot.behavior.take() {
            behavior.update(&mut NodeCx { id, tree: self, ctx, tick });
            self.restore(id, behavior);
        }

        let Some(slot) = self.slots.get_mut(&id) else { return };
        slot.node.step_fade(tick.now);
        if slot.node.step_movement(tick.now) {
            self.epoch += 1;
        }

        let children = self.children(id).to_vec();
        for child in children {
            self.update_node(child, ctx, tick);
        }
    }

    /// Draws every enabled and visible node, parents beneath children.
    pub fn draw(&self, ctx: &C, painter: &mut Painter<'_>, tick: Tick) {
        self.draw_node(self.root, ctx, painter, tick);
    }

    fn draw_node(&self, id: NodeId, ctx: &C, painter: &mut Painter<'_>, tick: Tick) {
        let Some(slot) = self.slots.get(&id) else { return };
        if !slot.node.enabled || !slot.node.visible {
            return;
        }

        if let Some(behavior) = &slot.behavior {
            behavior.draw(&mut DrawCx { id, tree: self, ctx, painter, tick });
        }
        for child in &slot.node.children {
            self.draw_node(*child, ctx, painter, tick);
        }
        if let Some(behavior) = &slot.behavior {
            behavior.draw_over(&mut DrawCx { id, tree: self, ctx, painter, tick });
        }
        painter.set_tint(Color::WHITE);
    }
}

impl<C: 'static> Slot<C> {
    fn new(node: Node, mut behavior: Option<Box<dyn Behavior<C>>>) -> Self {
        let hooks = behavior.as_mut().and_then(|b| b.interactive());
        let interactive = hooks.is_some();
        let accepts_press = hooks.is_some_and(|h| h.accepts_press());
        Self {
            node,
            behavior,
            interactive,
            accepts_press,
            memo: Cell::new(None),
        }
    }
}
