use std::collections::VecDeque;

use rift_engine::coords::Vec2;
use rift_engine::interp::Easing;
use rift_engine::paint::Rgb;
use rift_engine::render::Painter;
use rift_engine::time::Tick;

use crate::completion::{Completion, Resolver};
use crate::id::NodeId;
use crate::node::{round_half_up, Tween};
use crate::scene::SceneContext;
use crate::tree::NodeTree;

type Callback<C> = Box<dyn FnOnce(&mut Stage<C>, &mut C)>;
type Step<C> = Box<dyn FnOnce(&mut Stage<C>, &mut C) -> Completion>;

struct Delay<C> {
    elapsed: f64,
    ms: f64,
    callback: Callback<C>,
    resolver: Resolver,
}

/// Ordered continuation chain run by a [`Stage`].
///
/// Each step starts once the completion returned by the previous step is
/// done. An abandoned completion abandons the rest of the chain.
pub struct Sequence<C> {
    steps: VecDeque<Step<C>>,
}

impl<C> Default for Sequence<C> {
    fn default() -> Self {
        Self { steps: VecDeque::new() }
    }
}

impl<C> Sequence<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, step: impl FnOnce(&mut Stage<C>, &mut C) -> Completion + 'static) -> Self {
        self.steps.push_back(Box::new(step));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

struct Running<C> {
    steps: VecDeque<Step<C>>,
    waiting: Completion,
    resolver: Resolver,
}

/// Everything one scene owns at runtime: its node tree, pointer routing
/// state, background colour and timers.
pub struct Stage<C> {
    pub tree: NodeTree<C>,
    hovered: Vec<NodeId>,
    pressed: Vec<NodeId>,
    input_bound: bool,
    background: Rgb,
    background_tween: Option<Tween<Rgb>>,
    delays: Vec<Delay<C>>,
    sequences: Vec<Running<C>>,
    tick: Tick,
}

impl<C> Stage<C> {
    pub fn bind_input(&mut self) {
        self.input_bound = true;
    }

    pub fn unbind_input(&mut self) {
        self.input_bound = false;
    }

    #[inline]
    pub fn input_bound(&self) -> bool {
        self.input_bound
    }

    #[inline]
    pub fn hovered(&self) -> &[NodeId] {
        &self.hovered
    }
}

impl<C: SceneContext> Stage<C> {
    pub fn new(size: Vec2) -> Self {
        Self {
            tree: NodeTree::new(size),
            hovered: Vec::new(),
            pressed: Vec::new(),
            input_bound: false,
            background: Rgb::default(),
            background_tween: None,
            delays: Vec::new(),
            sequences: Vec::new(),
            tick: Tick::default(),
        }
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Tick of the most recent update.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    // ── background ────────────────────────────────────────────────────────

    #[inline]
    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Adopts the current global background as this stage's own.
    pub fn sync_background(&mut self, ctx: &mut C) {
        self.background = *ctx.background();
    }

    /// Tweens the global background from this stage's colour to `to`,
    /// rounding each channel per step.
    pub fn change_background(&mut self, ctx: &mut C, to: Rgb, duration: f64, easing: Easing) -> Completion {
        self.background_tween = None;
        if duration <= 0.0 || to == self.background {
            self.background = to;
            *ctx.background() = to;
            return Completion::done();
        }
        let (completion, resolver) = Completion::pending();
        self.background_tween = Some(Tween::new(self.background, to, duration, easing, resolver));
        completion
    }

    fn step_background(&mut self, ctx: &mut C) {
        let Some(tween) = self.background_tween.as_mut() else { return };
        let (v, done) = tween.step(self.tick.now);
        let channel = |from: u8, to: u8| {
            let c = from as f64 + round_half_up((to as f64 - from as f64) * v);
            c.clamp(0.0, 255.0) as u8
        };
        self.background = if done {
            tween.to
        } else {
            Rgb::new(
                channel(tween.from.r, tween.to.r),
                channel(tween.from.g, tween.to.g),
                channel(tween.from.b, tween.to.b),
            )
        };
        *ctx.background() = self.background;
        if done {
            self.background_tween = None;
        }
    }

    // ── timers ────────────────────────────────────────────────────────────

    /// Runs `callback` once `ms` milliseconds of updates have elapsed.
    pub fn delay(&mut self, ms: f64, callback: impl FnOnce(&mut Stage<C>, &mut C) + 'static) -> Completion {
        let (completion, resolver) = Completion::pending();
        self.delays.push(Delay {
            elapsed: 0.0,
            ms,
            callback: Box::new(callback),
            resolver,
        });
        completion
    }

    /// Drops every pending delay and sequence; their completions are abandoned.
    pub fn cancel_timers(&mut self) {
        self.delays.clear();
        self.sequences.clear();
    }

    fn step_delays(&mut self, ctx: &mut C) {
        let delta = self.tick.delta;
        for delay in &mut self.delays {
            delay.elapsed += delta;
        }
        let (due, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.delays).into_iter().partition(|d| d.elapsed >= d.ms);
        self.delays = waiting;
        for delay in due {
            (delay.callback)(self, ctx);
            delay.resolver.resolve();
        }
    }

    /// Starts `sequence`; its first step runs immediately.
    pub fn run(&mut self, ctx: &mut C, sequence: Sequence<C>) -> Completion {
        let (completion, resolver) = Completion::pending();
        let running = Running {
            steps: sequence.steps,
            waiting: Completion::done(),
            resolver,
        };
        if let Some(running) = self.advance(running, ctx) {
            self.sequences.push(running);
        }
        completion
    }

    // Returns the sequence if it still waits on something.
    fn advance(&mut self, mut running: Running<C>, ctx: &mut C) -> Option<Running<C>> {
        loop {
            if running.waiting.is_abandoned() {
                return None;
            }
            if running.waiting.is_pending() {
                return Some(running);
            }
            match running.steps.pop_front() {
                Some(step) => running.waiting = step(self, ctx),
                None => {
                    running.resolver.resolve();
                    return None;
                }
            }
        }
    }

    fn step_sequences(&mut self, ctx: &mut C) {
        for running in std::mem::take(&mut self.sequences) {
            if let Some(running) = self.advance(running, ctx) {
                self.sequences.push(running);
            }
        }
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Background tween, then due delays, then the node tree, then any
    /// sequences whose awaited step has finished.
    pub fn update(&mut self, ctx: &mut C, tick: Tick) {
        self.tick = tick;
        self.step_background(ctx);
        self.step_delays(ctx);
        self.tree.update(ctx, tick);
        self.step_sequences(ctx);
    }

    pub fn draw(&self, ctx: &C, painter: &mut Painter<'_>) {
        self.tree.draw(ctx, painter, self.tick);
    }

    // ── pointer routing ───────────────────────────────────────────────────

    /// Hovers interactive nodes newly under `p` and blurs those it left.
    pub fn pointer_move(&mut self, ctx: &mut C, p: Vec2, mouse_down: bool) {
        if !self.input_bound {
            return;
        }
        let tick = self.tick;
        let hits: Vec<NodeId> = self
            .tree
            .nodes_at(p)
            .into_iter()
            .filter(|id| self.tree.is_interactive(*id))
            .collect();

        for id in &hits {
            let Some(node) = self.tree.node_mut(*id) else { continue };
            if node.hovered {
                continue;
            }
            node.hovered = true;
            self.tree.with_interactive(*id, ctx, tick, |hooks, cx| hooks.on_hover(cx, mouse_down));
        }

        let left: Vec<NodeId> = self.hovered.iter().copied().filter(|id| !hits.contains(id)).collect();
        self.hovered = hits;
        for id in left {
            let Some(node) = self.tree.node_mut(id) else { continue };
            node.hovered = false;
            self.tree.with_interactive(id, ctx, tick, |hooks, cx| hooks.on_blur(cx));
        }
    }

    /// Presses every hovered node that accepts presses.
    ///
    /// A touch has no hover before it lands, so a touch press first re-tests
    /// hover at `p` as a held press. A mouse press acts on the hover state
    /// the last move left behind.
    pub fn pointer_down(&mut self, ctx: &mut C, p: Vec2, touch: bool) {
        if !self.input_bound {
            return;
        }
        if touch {
            self.pointer_move(ctx, p, true);
        }
        let tick = self.tick;
        for id in self.hovered.clone() {
            if !self.tree.accepts_press(id) {
                continue;
            }
            let Some(node) = self.tree.node_mut(id) else { continue };
            node.pressed = true;
            self.tree.with_interactive(id, ctx, tick, |hooks, cx| hooks.on_mouse_down(cx));
            if !self.pressed.contains(&id) {
                self.pressed.push(id);
            }
        }
    }

    /// Releases every pressed node; those still hovered get `on_mouse_up`.
    pub fn pointer_up(&mut self, ctx: &mut C) {
        if !self.input_bound {
            return;
        }
        let tick = self.tick;
        for id in std::mem::take(&mut self.pressed) {
            let Some(node) = self.tree.node(id) else { continue };
            if node.hovered && node.pressed {
                self.tree.with_interactive(id, ctx, tick, |hooks, cx| hooks.on_mouse_up(cx));
            }
            if let Some(node) = self.tree.node_mut(id) {
                node.pressed = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{unsupported_hook, Behavior, Interactive, NodeCx};
    use crate::node::Node;
    use crate::testing::{frame, TestCtx};
    use pretty_assertions::assert_eq;

    struct Recorder(&'static str);

    impl Behavior<TestCtx> for Recorder {
        fn interactive(&mut self) -> Option<&mut dyn Interactive<TestCtx>> {
            Some(self)
        }
    }

    impl Interactive<TestCtx> for Recorder {
        fn on_hover(&mut self, cx: &mut NodeCx<'_, TestCtx>, mouse_down: bool) {
            cx.ctx.log.push(format!("hover {} {mouse_down}", self.0));
        }

        fn on_blur(&mut self, cx: &mut NodeCx<'_, TestCtx>) {
            cx.ctx.log.push(format!("blur {}", self.0));
        }

        fn on_mouse_down(&mut self, cx: &mut NodeCx<'_, TestCtx>) {
            cx.ctx.log.push(format!("down {}", self.0));
        }

        fn on_mouse_up(&mut self, cx: &mut NodeCx<'_, TestCtx>) {
            cx.ctx.log.push(format!("up {}", self.0));
        }
    }

    /// Shows something on hover; cannot be pressed.
    struct Sign;

    impl Behavior<TestCtx> for Sign {
        fn interactive(&mut self) -> Option<&mut dyn Interactive<TestCtx>> {
            Some(self)
        }
    }

    impl Interactive<TestCtx> for Sign {
        fn accepts_press(&self) -> bool {
            false
        }

        fn on_hover(&mut self, cx: &mut NodeCx<'_, TestCtx>, mouse_down: bool) {
            cx.ctx.log.push(format!("hover sign {mouse_down}"));
        }

        fn on_blur(&mut self, cx: &mut NodeCx<'_, TestCtx>) {
            cx.ctx.log.push("blur sign".into());
        }

        fn on_mouse_down(&mut self, cx: &mut NodeCx<'_, TestCtx>) {
            unsupported_hook(cx.id, "on_mouse_down");
        }

        fn on_mouse_up(&mut self, cx: &mut NodeCx<'_, TestCtx>) {
            unsupported_hook(cx.id, "on_mouse_up");
        }
    }

    fn stage() -> Stage<TestCtx> {
        let mut stage = Stage::new(Vec2::new(512.0, 288.0));
        stage.bind_input();
        stage
    }

    fn button(stage: &mut Stage<TestCtx>, name: &'static str, x: f32) -> NodeId {
        let root = stage.root();
        stage.tree.spawn_in_with(root, Node::new(Vec2::new(20.0, 20.0)).at(x, 0.0), Recorder(name))
    }

    // ── pointer routing ───────────────────────────────────────────────────

    #[test]
    fn hover_fires_once_and_blur_on_leave() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        button(&mut s, "a", 0.0);

        s.pointer_move(&mut ctx, Vec2::new(5.0, 5.0), false);
        s.pointer_move(&mut ctx, Vec2::new(6.0, 5.0), false);
        s.pointer_move(&mut ctx, Vec2::new(100.0, 5.0), false);
        assert_eq!(ctx.log, ["hover a false", "blur a"]);
    }

    #[test]
    fn click_requires_release_over_the_pressed_node() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        let a = button(&mut s, "a", 0.0);

        s.pointer_move(&mut ctx, Vec2::new(5.0, 5.0), false);
        s.pointer_down(&mut ctx, Vec2::new(5.0, 5.0), false);
        assert!(s.tree.node(a).is_some_and(|n| n.is_pressed()));
        s.pointer_up(&mut ctx);
        assert_eq!(ctx.log, ["hover a false", "down a", "up a"]);
        assert!(!s.tree.node(a).is_some_and(|n| n.is_pressed()));
    }

    #[test]
    fn release_elsewhere_does_not_click() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        let a = button(&mut s, "a", 0.0);
        button(&mut s, "b", 50.0);

        s.pointer_down(&mut ctx, Vec2::new(5.0, 5.0), true);
        s.pointer_move(&mut ctx, Vec2::new(55.0, 5.0), true);
        s.pointer_up(&mut ctx);
        assert_eq!(ctx.log, ["hover a true", "down a", "hover b true", "blur a"]);
        assert!(!s.tree.node(a).is_some_and(|n| n.is_pressed()));
    }

    #[test]
    fn returning_before_release_still_clicks() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        button(&mut s, "a", 0.0);
        button(&mut s, "b", 50.0);

        s.pointer_down(&mut ctx, Vec2::new(5.0, 5.0), true);
        s.pointer_move(&mut ctx, Vec2::new(55.0, 5.0), true);
        s.pointer_move(&mut ctx, Vec2::new(5.0, 5.0), true);
        s.pointer_up(&mut ctx);
        assert_eq!(ctx.log, ["hover a true", "down a", "hover b true", "blur a", "hover a true", "blur b", "up a"]);
    }

    #[test]
    fn a_mouse_press_only_reaches_what_is_already_hovered() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        let a = button(&mut s, "a", 0.0);

        s.pointer_down(&mut ctx, Vec2::new(5.0, 5.0), false);
        assert!(ctx.log.is_empty());
        assert!(!s.tree.node(a).is_some_and(|n| n.is_pressed()));

        s.pointer_move(&mut ctx, Vec2::new(5.0, 5.0), false);
        s.pointer_down(&mut ctx, Vec2::new(5.0, 5.0), false);
        assert_eq!(ctx.log, ["hover a false", "down a"]);
    }

    #[test]
    fn unbound_stage_ignores_the_pointer() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        button(&mut s, "a", 0.0);
        s.unbind_input();
        s.pointer_down(&mut ctx, Vec2::new(5.0, 5.0), true);
        s.pointer_up(&mut ctx);
        assert!(ctx.log.is_empty());
    }

    #[test]
    fn hover_only_nodes_are_never_pressed() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        let root = s.root();
        let sign = s.tree.spawn_in_with(root, Node::new(Vec2::new(20.0, 20.0)), Sign);
        button(&mut s, "a", 10.0);

        s.pointer_down(&mut ctx, Vec2::new(15.0, 5.0), true);
        assert!(!s.tree.node(sign).is_some_and(|n| n.is_pressed()));
        s.pointer_up(&mut ctx);
        s.pointer_move(&mut ctx, Vec2::new(100.0, 100.0), false);
        assert_eq!(ctx.log, ["hover sign true", "hover a true", "down a", "up a", "blur sign", "blur a"]);
    }

    #[test]
    #[should_panic(expected = "unsupported interactive hook on_mouse_down")]
    fn unsupported_hooks_are_fatal() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        let root = s.root();
        let sign = s.tree.spawn_in_with(root, Node::new(Vec2::new(20.0, 20.0)), Sign);
        let tick = s.tick();
        s.tree.with_interactive(sign, &mut ctx, tick, |hooks, cx| hooks.on_mouse_down(cx));
    }

    #[test]
    fn overlapping_nodes_are_all_hovered() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        button(&mut s, "a", 0.0);
        button(&mut s, "b", 10.0);
        s.pointer_move(&mut ctx, Vec2::new(15.0, 5.0), false);
        assert_eq!(ctx.log, ["hover a false", "hover b false"]);
        assert_eq!(s.hovered().len(), 2);
    }

    // ── background ────────────────────────────────────────────────────────

    #[test]
    fn background_tween_writes_the_global_colour() {
        let mut s = stage().with_background(Rgb::new(0, 0, 0));
        let mut ctx = TestCtx::default();
        let done = s.change_background(&mut ctx, Rgb::new(100, 50, 11), 100.0, Easing::Linear);

        s.update(&mut ctx, frame(0.0));
        s.update(&mut ctx, frame(50.0));
        assert_eq!(ctx.background, Rgb::new(50, 25, 6));
        s.update(&mut ctx, frame(100.0));
        assert_eq!(ctx.background, Rgb::new(100, 50, 11));
        assert!(done.is_done());
    }

    #[test]
    fn instant_background_change() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        assert!(s.change_background(&mut ctx, Rgb::new(1, 2, 3), 0.0, Easing::Linear).is_done());
        assert_eq!(ctx.background, Rgb::new(1, 2, 3));
    }

    // ── timers ────────────────────────────────────────────────────────────

    #[test]
    fn delay_fires_once_elapsed_reaches_its_duration() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        let done = s.delay(32.0, |_, ctx| ctx.log.push("fired".into()));

        s.update(&mut ctx, Tick::new(16.0, 16.0));
        assert!(ctx.log.is_empty());
        s.update(&mut ctx, Tick::new(32.0, 16.0));
        assert_eq!(ctx.log, ["fired"]);
        assert!(done.is_done());
        s.update(&mut ctx, Tick::new(48.0, 16.0));
        assert_eq!(ctx.log.len(), 1);
    }

    #[test]
    fn delays_scheduled_by_a_delay_wait_for_the_next_update() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        s.delay(0.0, |stage, _| {
            stage.delay(0.0, |_, ctx| ctx.log.push("inner".into()));
        });
        s.update(&mut ctx, frame(0.0));
        assert!(ctx.log.is_empty());
        s.update(&mut ctx, frame(16.0));
        assert_eq!(ctx.log, ["inner"]);
    }

    #[test]
    fn sequence_waits_for_each_step() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        let root = s.root();
        let n = s.tree.spawn_in(root, Node::new(Vec2::splat(4.0)));

        let done = s.run(
            &mut ctx,
            Sequence::new()
                .then(move |stage: &mut Stage<TestCtx>, ctx: &mut TestCtx| {
                    ctx.log.push("move".into());
                    stage.tree.move_by(n, Vec2::new(0.0, 10.0), 100.0, Easing::Linear)
                })
                .then(|_, ctx: &mut TestCtx| {
                    ctx.log.push("landed".into());
                    Completion::done()
                }),
        );
        assert_eq!(ctx.log, ["move"]);

        s.update(&mut ctx, frame(0.0));
        s.update(&mut ctx, frame(60.0));
        assert_eq!(ctx.log.len(), 1);
        s.update(&mut ctx, frame(100.0));
        assert_eq!(ctx.log, ["move", "landed"]);
        assert!(done.is_done());
    }

    #[test]
    fn abandoned_step_abandons_the_sequence() {
        let mut s = stage();
        let mut ctx = TestCtx::default();
        let root = s.root();
        let n = s.tree.spawn_in(root, Node::new(Vec2::splat(4.0)));

        let done = s.run(
            &mut ctx,
            Sequence::new()
                .then(move |stage: &mut Stage<TestCtx>, _: &mut TestCtx| {
                    stage.tree.move_by(n, Vec2::new(0.0, 10.0), 100.0, Easing::Linear)
                })
                .then(|_, ctx: &mut TestCtx| {
                    ctx.log.push("never".into());
                    Completion::done()
                }),
        );
        s.tree.set_origin(n, Vec2::zero());
        s.update(&mut ctx, frame(0.0));
        assert!(done.is_abandoned());
        assert!(ctx.log.is_empty());
    }
}
