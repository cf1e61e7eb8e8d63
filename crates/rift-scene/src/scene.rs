use rift_engine::paint::Rgb;
use rift_engine::render::Painter;
use rift_engine::time::Tick;

use crate::completion::Completion;
use crate::navigation::Navigation;
use crate::stage::Stage;

/// What the scene layer needs from the game's shared context.
pub trait SceneContext: 'static {
    fn navigation(&mut self) -> &mut Navigation;

    /// Global clear colour; scenes tween it through their [`Stage`].
    fn background(&mut self) -> &mut Rgb;
}

/// Scene-level logic around a [`Stage`].
///
/// The default transitions bind or unbind pointer input and finish at once.
pub trait SceneBehavior<C> {
    fn transition_in(&mut self, stage: &mut Stage<C>, _ctx: &mut C) -> Completion {
        stage.bind_input();
        Completion::done()
    }

    fn transition_out(&mut self, stage: &mut Stage<C>, _ctx: &mut C) -> Completion {
        stage.unbind_input();
        Completion::done()
    }

    /// Runs before the stage's own update.
    fn update(&mut self, _stage: &mut Stage<C>, _ctx: &mut C, _tick: Tick) {}

    /// Draws beneath the node tree.
    fn draw(&self, _stage: &Stage<C>, _ctx: &C, _painter: &mut Painter<'_>) {}

    /// Draws above the node tree.
    fn draw_over(&self, _stage: &Stage<C>, _ctx: &C, _painter: &mut Painter<'_>) {}
}

/// A named stage plus its behavior; the unit the [`SceneManager`](crate::SceneManager) stacks.
pub struct Scene<C> {
    name: String,
    pub stage: Stage<C>,
    pub(crate) behavior: Box<dyn SceneBehavior<C>>,
}

impl<C: SceneContext> Scene<C> {
    pub fn new(name: impl Into<String>, stage: Stage<C>, behavior: impl SceneBehavior<C> + 'static) -> Self {
        Self {
            name: name.into(),
            stage,
            behavior: Box::new(behavior),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn transition_in(&mut self, ctx: &mut C) -> Completion {
        log::debug!("scene {:?} entering", self.name);
        self.behavior.transition_in(&mut self.stage, ctx)
    }

    pub(crate) fn transition_out(&mut self, ctx: &mut C) -> Completion {
        log::debug!("scene {:?} leaving", self.name);
        self.behavior.transition_out(&mut self.stage, ctx)
    }

    pub fn update(&mut self, ctx: &mut C, tick: Tick) {
        self.behavior.update(&mut self.stage, ctx, tick);
        self.stage.update(ctx, tick);
    }

    pub fn draw(&self, ctx: &C, painter: &mut Painter<'_>) {
        self.behavior.draw(&self.stage, ctx, painter);
        self.stage.draw(ctx, painter);
        self.behavior.draw_over(&self.stage, ctx, painter);
    }
}
