use std::collections::HashMap;

use rift_engine::coords::Vec2;
use rift_engine::render::Painter;
use rift_engine::time::Tick;

use crate::completion::{Completion, CompletionState};
use crate::error::SceneError;
use crate::navigation::NavRequest;
use crate::scene::{Scene, SceneContext};

type Factory<C> = Box<dyn Fn(&mut C) -> Scene<C>>;

#[derive(Debug)]
enum StackOp {
    Push(String),
    Pop,
    PopTo(String),
}

enum Transition {
    Idle,
    /// The top scene is leaving; `then` is applied once it finishes.
    Leaving { completion: Completion, then: StackOp },
    Entering { completion: Completion },
}

/// Stack of scenes with sequenced transitions.
///
/// Only the top scene is updated, drawn and routed input. Stack changes are
/// requested through [`SceneContext::navigation`] and applied one at a time:
/// the outgoing scene's `transition_out` must finish before the stack
/// changes, and the incoming scene's `transition_in` must finish before the
/// next request is taken.
pub struct SceneManager<C> {
    factories: HashMap<String, Factory<C>>,
    scenes: HashMap<String, Scene<C>>,
    stack: Vec<String>,
    transition: Transition,
    pointer: Option<Vec2>,
}

impl<C: SceneContext> Default for SceneManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SceneContext> SceneManager<C> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            scenes: HashMap::new(),
            stack: Vec::new(),
            transition: Transition::Idle,
            pointer: None,
        }
    }

    /// Registers how to build the scene called `name`. Instances are built
    /// on first push and on `rebuild`.
    pub fn register(&mut self, name: impl Into<String>, factory: impl Fn(&mut C) -> Scene<C> + 'static) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    pub fn current(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    pub fn scene(&self, name: &str) -> Option<&Scene<C>> {
        self.scenes.get(name)
    }

    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene<C>> {
        self.scenes.get_mut(name)
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        !matches!(self.transition, Transition::Idle)
    }

    fn top_mut(&mut self) -> Option<&mut Scene<C>> {
        let name = self.stack.last()?;
        self.scenes.get_mut(name)
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Applies queued navigation, updates the top scene and advances any
    /// running transition.
    pub fn update(&mut self, ctx: &mut C, tick: Tick) -> Result<(), SceneError> {
        self.drain_requests(ctx)?;
        if let Some(scene) = self.top_mut() {
            scene.update(ctx, tick);
        }
        self.advance(ctx);
        self.drain_requests(ctx)
    }

    pub fn draw(&self, ctx: &C, painter: &mut Painter<'_>) {
        let Some(scene) = self.stack.last().and_then(|name| self.scenes.get(name)) else {
            return;
        };
        scene.draw(ctx, painter);
    }

    // ── pointer ───────────────────────────────────────────────────────────

    pub fn pointer_move(&mut self, ctx: &mut C, p: Vec2, mouse_down: bool) {
        self.pointer = Some(p);
        if let Some(scene) = self.top_mut() {
            scene.stage.pointer_move(ctx, p, mouse_down);
        }
    }

    /// `touch` marks a press that arrived without a hover before it.
    pub fn pointer_down(&mut self, ctx: &mut C, p: Vec2, touch: bool) {
        self.pointer = Some(p);
        if let Some(scene) = self.top_mut() {
            scene.stage.pointer_down(ctx, p, touch);
        }
    }

    pub fn pointer_up(&mut self, ctx: &mut C) {
        if let Some(scene) = self.top_mut() {
            scene.stage.pointer_up(ctx);
        }
    }

    // ── stack operations ──────────────────────────────────────────────────

    fn drain_requests(&mut self, ctx: &mut C) -> Result<(), SceneError> {
        while !self.is_transitioning() {
            let Some(request) = ctx.navigation().next() else { break };
            log::debug!("scene request {request:?}");
            match request {
                NavRequest::Push(name) => self.begin_push(ctx, name)?,
                NavRequest::Pop => self.begin(ctx, StackOp::Pop)?,
                NavRequest::PopTo(name) => self.begin_pop_to(ctx, name)?,
                NavRequest::Rebuild(name) => self.rebuild(ctx, &name)?,
                NavRequest::Clear => self.clear(),
            }
        }
        Ok(())
    }

    fn begin_push(&mut self, ctx: &mut C, name: String) -> Result<(), SceneError> {
        if !self.factories.contains_key(&name) {
            return Err(SceneError::UnknownScene(name));
        }
        if self.stack.is_empty() {
            self.apply(ctx, StackOp::Push(name));
            return Ok(());
        }
        self.begin(ctx, StackOp::Push(name))
    }

    fn begin_pop_to(&mut self, ctx: &mut C, name: String) -> Result<(), SceneError> {
        if !self.stack.contains(&name) {
            return Err(SceneError::NotOnStack(name));
        }
        if self.current() == Some(name.as_str()) {
            return Ok(());
        }
        self.begin(ctx, StackOp::PopTo(name))
    }

    // Starts the outgoing transition of the top scene.
    fn begin(&mut self, ctx: &mut C, op: StackOp) -> Result<(), SceneError> {
        let Some(scene) = self.top_mut() else {
            return Err(SceneError::EmptyStack);
        };
        let completion = scene.transition_out(ctx);
        self.transition = Transition::Leaving { completion, then: op };
        Ok(())
    }

    /// Empties the stack at once. Built scene instances are kept.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.transition = Transition::Idle;
    }

    fn rebuild(&mut self, ctx: &mut C, name: &str) -> Result<(), SceneError> {
        if self.stack.iter().any(|s| s == name) {
            return Err(SceneError::Active(name.to_string()));
        }
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SceneError::UnknownScene(name.to_string()))?;
        let scene = factory(ctx);
        self.scenes.insert(name.to_string(), scene);
        Ok(())
    }

    // Changes the stack and starts the incoming transition of the new top.
    fn apply(&mut self, ctx: &mut C, op: StackOp) {
        match op {
            StackOp::Push(name) => {
                if !self.scenes.contains_key(&name) {
                    if let Some(factory) = self.factories.get(&name) {
                        let scene = factory(ctx);
                        self.scenes.insert(name.clone(), scene);
                    }
                }
                self.stack.push(name);
            }
            StackOp::Pop => {
                self.stack.pop();
            }
            StackOp::PopTo(name) => {
                while self.current().is_some_and(|top| top != name) {
                    self.stack.pop();
                }
            }
        }

        self.transition = match self.top_mut() {
            Some(scene) => Transition::Entering { completion: scene.transition_in(ctx) },
            None => Transition::Idle,
        };
    }

    fn advance(&mut self, ctx: &mut C) {
        match std::mem::replace(&mut self.transition, Transition::Idle) {
            Transition::Idle => {}
            Transition::Leaving { completion, then } => match completion.state() {
                CompletionState::Pending => self.transition = Transition::Leaving { completion, then },
                state => {
                    if state == CompletionState::Abandoned {
                        log::warn!("outgoing transition was abandoned; applying {then:?} anyway");
                    }
                    self.apply(ctx, then);
                }
            },
            Transition::Entering { completion } => match completion.state() {
                CompletionState::Pending => self.transition = Transition::Entering { completion },
                state => {
                    if state == CompletionState::Abandoned {
                        log::warn!("incoming transition was abandoned");
                    }
                    // Hover whatever now sits under the pointer.
                    if let Some(p) = self.pointer {
                        if let Some(scene) = self.top_mut() {
                            scene.stage.pointer_move(ctx, p, false);
                        }
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{Behavior, Interactive, NodeCx};
    use crate::node::Node;
    use crate::scene::SceneBehavior;
    use crate::stage::Stage;
    use crate::testing::{frame, TestCtx};
    use pretty_assertions::assert_eq;
    use rift_engine::interp::Easing;

    /// Logs its transitions; leaving fades the root over 100ms.
    struct Logged(&'static str);

    impl SceneBehavior<TestCtx> for Logged {
        fn transition_in(&mut self, stage: &mut Stage<TestCtx>, ctx: &mut TestCtx) -> Completion {
            ctx.log.push(format!("in {}", self.0));
            stage.bind_input();
            Completion::done()
        }

        fn transition_out(&mut self, stage: &mut Stage<TestCtx>, ctx: &mut TestCtx) -> Completion {
            ctx.log.push(format!("out {}", self.0));
            stage.unbind_input();
            let root = stage.root();
            stage.tree.fade(root, 0, 100.0, Easing::Linear)
        }
    }

    struct Pad;

    impl Behavior<TestCtx> for Pad {
        fn interactive(&mut self) -> Option<&mut dyn Interactive<TestCtx>> {
            Some(self)
        }
    }

    impl Interactive<TestCtx> for Pad {
        fn on_hover(&mut self, cx: &mut NodeCx<'_, TestCtx>, _mouse_down: bool) {
            cx.ctx.log.push("hover pad".into());
        }
        fn on_blur(&mut self, _cx: &mut NodeCx<'_, TestCtx>) {}
        fn on_mouse_down(&mut self, _cx: &mut NodeCx<'_, TestCtx>) {}
        fn on_mouse_up(&mut self, _cx: &mut NodeCx<'_, TestCtx>) {}
    }

    fn manager() -> SceneManager<TestCtx> {
        let mut m = SceneManager::new();
        for name in ["menu", "game", "help"] {
            m.register(name, move |_ctx: &mut TestCtx| {
                let mut stage = Stage::new(Vec2::new(512.0, 288.0));
                let root = stage.root();
                stage.tree.spawn_in_with(root, Node::new(Vec2::splat(10.0)), Pad);
                Scene::new(name, stage, Logged(name))
            });
        }
        m
    }

    fn run(m: &mut SceneManager<TestCtx>, ctx: &mut TestCtx, from: f64, to: f64) {
        let mut now = from;
        while now <= to {
            m.update(ctx, frame(now)).expect("scene request");
            now += 16.0;
        }
    }

    #[test]
    fn first_push_enters_immediately() {
        let mut m = manager();
        let mut ctx = TestCtx::default();
        ctx.nav.push("menu");
        m.update(&mut ctx, frame(0.0)).expect("push");
        assert_eq!(m.stack(), ["menu"]);
        assert_eq!(ctx.log, ["in menu"]);
    }

    #[test]
    fn push_waits_for_the_outgoing_transition() {
        let mut m = manager();
        let mut ctx = TestCtx::default();
        ctx.nav.push("menu");
        run(&mut m, &mut ctx, 0.0, 16.0);
        ctx.nav.push("game");
        run(&mut m, &mut ctx, 32.0, 64.0);
        assert_eq!(m.stack(), ["menu"]);
        assert!(m.is_transitioning());

        run(&mut m, &mut ctx, 80.0, 200.0);
        assert_eq!(m.stack(), ["menu", "game"]);
        assert_eq!(ctx.log, ["in menu", "out menu", "in game"]);
    }

    #[test]
    fn requests_queue_behind_a_running_transition() {
        let mut m = manager();
        let mut ctx = TestCtx::default();
        ctx.nav.push("menu");
        run(&mut m, &mut ctx, 0.0, 0.0);
        ctx.nav.push("game");
        ctx.nav.push("help");
        run(&mut m, &mut ctx, 16.0, 400.0);
        assert_eq!(m.stack(), ["menu", "game", "help"]);
        assert_eq!(ctx.log, ["in menu", "out menu", "in game", "out game", "in help"]);
    }

    #[test]
    fn pop_to_skips_intermediate_transitions() {
        let mut m = manager();
        let mut ctx = TestCtx::default();
        ctx.nav.push("menu");
        ctx.nav.push("game");
        ctx.nav.push("help");
        run(&mut m, &mut ctx, 0.0, 400.0);
        ctx.log.clear();

        ctx.nav.pop_to("menu");
        run(&mut m, &mut ctx, 416.0, 600.0);
        assert_eq!(m.stack(), ["menu"]);
        assert_eq!(ctx.log, ["out help", "in menu"]);
    }

    #[test]
    fn invalid_requests_are_errors() {
        let mut m = manager();
        let mut ctx = TestCtx::default();
        ctx.nav.pop();
        assert_eq!(m.update(&mut ctx, frame(0.0)), Err(SceneError::EmptyStack));

        ctx.nav.push("nowhere");
        assert_eq!(m.update(&mut ctx, frame(16.0)), Err(SceneError::UnknownScene("nowhere".into())));

        ctx.nav.push("menu");
        ctx.nav.pop_to("game");
        assert_eq!(m.update(&mut ctx, frame(32.0)), Err(SceneError::NotOnStack("game".into())));

        ctx.nav.rebuild("menu");
        assert_eq!(m.update(&mut ctx, frame(48.0)), Err(SceneError::Active("menu".into())));
    }

    #[test]
    fn clear_skips_every_transition() {
        let mut m = manager();
        let mut ctx = TestCtx::default();
        ctx.nav.push("menu");
        run(&mut m, &mut ctx, 0.0, 0.0);
        ctx.nav.clear();
        ctx.nav.push("help");
        run(&mut m, &mut ctx, 16.0, 16.0);
        assert_eq!(m.stack(), ["help"]);
        assert_eq!(ctx.log, ["in menu", "in help"]);
    }

    #[test]
    fn rebuild_replaces_an_inactive_scene() {
        let mut m = manager();
        let mut ctx = TestCtx::default();
        ctx.nav.push("menu");
        ctx.nav.push("game");
        ctx.nav.pop();
        run(&mut m, &mut ctx, 0.0, 600.0);
        assert_eq!(m.stack(), ["menu"]);

        let before = m.scene("game").map(|s| s.stage.root());
        ctx.nav.rebuild("game");
        run(&mut m, &mut ctx, 616.0, 616.0);
        let after = m.scene("game").map(|s| s.stage.root());
        assert!(before.is_some() && after.is_some() && before != after);
    }

    fn bound(m: &SceneManager<TestCtx>) -> Vec<&'static str> {
        ["menu", "game", "help"]
            .into_iter()
            .filter(|name| m.scene(name).is_some_and(|s| s.stage.input_bound()))
            .collect()
    }

    #[test]
    fn the_outgoing_scene_lets_go_of_input_before_the_next_takes_it() {
        let mut m = manager();
        let mut ctx = TestCtx::default();
        ctx.nav.push("menu");
        run(&mut m, &mut ctx, 0.0, 16.0);
        assert_eq!(bound(&m), ["menu"]);

        ctx.nav.push("game");
        m.update(&mut ctx, frame(32.0)).expect("push");
        assert_eq!(m.stack(), ["menu"]);
        assert!(bound(&m).is_empty());

        let mut now = 48.0;
        while m.is_transitioning() {
            m.update(&mut ctx, frame(now)).expect("push");
            assert!(bound(&m).len() <= 1, "two scenes bound at {now}");
            now += 16.0;
        }
        assert_eq!(bound(&m), ["game"]);
    }

    #[test]
    fn a_suspended_scene_is_frozen() {
        let mut m = manager();
        let mut ctx = TestCtx::default();
        ctx.nav.push("menu");
        ctx.nav.push("game");
        run(&mut m, &mut ctx, 0.0, 400.0);
        assert_eq!(m.stack(), ["menu", "game"]);

        let Some(menu) = m.scene_mut("menu") else { panic!("menu was built") };
        let root = menu.stage.root();
        let n = menu.stage.tree.spawn_in(root, Node::new(Vec2::splat(4.0)));
        let moved = menu.stage.tree.move_to(n, Vec2::new(50.0, 0.0), 100.0, Easing::Linear);

        run(&mut m, &mut ctx, 416.0, 1000.0);
        let origin = m.scene("menu").map(|s| s.stage.tree.origin(n));
        assert_eq!(origin, Some(Vec2::zero()));
        assert!(moved.is_pending());

        ctx.nav.pop();
        run(&mut m, &mut ctx, 1016.0, 1400.0);
        assert_eq!(m.stack(), ["menu"]);
        let origin = m.scene("menu").map(|s| s.stage.tree.origin(n));
        assert_eq!(origin, Some(Vec2::new(50.0, 0.0)));
        assert!(moved.is_done());
    }

    #[test]
    fn entering_scene_is_hovered_under_the_resting_pointer() {
        let mut m = manager();
        let mut ctx = TestCtx::default();
        m.pointer_move(&mut ctx, Vec2::new(2.0, 2.0), false);
        ctx.nav.push("menu");
        run(&mut m, &mut ctx, 0.0, 16.0);
        assert_eq!(ctx.log, ["in menu", "hover pad"]);
    }
}
