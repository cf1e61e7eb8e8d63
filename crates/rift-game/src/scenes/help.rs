use rift_engine::coords::Vec2;
use rift_engine::paint::{Color, Rgb};
use rift_engine::render::Painter;
use rift_engine::text::{Align, TextParams};
use rift_scene::widgets::{button_node, Button};
use rift_scene::{Completion, NodeCx, Scene, SceneBehavior, Stage};

use super::{above, fade_background, new_stage, slide_in, slide_out, HELP, LEAVE_BACKGROUND};
use crate::context::GameCtx;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const BACKGROUND: Rgb = Rgb::new(15, 15, 15);
const TEXT: Color = Color(0xFFEE_EEEE);
const LINE: f32 = 9.0;

pub(crate) const GLOSSARY: &[&str] = &[
    "player effects",
    "  attack - deal damage to the targeted creature",
    "  disrupt - lower the rift's stability",
    "  gain - add funding",
    "  draw - draw cards from your deck",
    "  destroy - remove cards from your hand for good",
    "  recall - send the right-most creature back into the rift",
    "  stitch - gather stitches; enough of them close the rift",
    "  old one - call on something from beyond; it may answer",
    "",
    "shared effects",
    "  discard - put cards from your hand onto your discard pile",
    "  spawn - creatures pour out of the rift",
    "  stabilize - raise the rift's stability",
    "",
    "rift effects",
    "  wound - wounded cards land on your discard pile",
    "  regenerate - the creature heals its wounds",
    "  summon - a creeping feeler joins the fray",
];

/// Effect glossary and the goal of the game.
pub struct HelpScene;

impl HelpScene {
    pub fn build() -> Scene<GameCtx> {
        let mut stage = new_stage();
        let root = stage.root();
        stage.tree.spawn_in_with(
            root,
            button_node(SCREEN_WIDTH / 2.0 - 50.0, SCREEN_HEIGHT - 33.0, Vec2::new(100.0, 30.0), Color(0xFF55_CC55)),
            Button::new("back", |cx: &mut NodeCx<'_, GameCtx>| cx.ctx.nav.pop()),
        );
        Scene::new(HELP, stage, HelpScene)
    }
}

impl SceneBehavior<GameCtx> for HelpScene {
    fn transition_in(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) -> Completion {
        fade_background(stage, ctx, BACKGROUND);
        slide_in(stage, ctx, above(), |_, _| Completion::done())
    }

    fn transition_out(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) -> Completion {
        fade_background(stage, ctx, LEAVE_BACKGROUND);
        slide_out(stage, above())
    }

    fn draw(&self, stage: &Stage<GameCtx>, _ctx: &GameCtx, painter: &mut Painter<'_>) {
        let at = stage.tree.top_left(stage.root());
        let centre = at.x + SCREEN_WIDTH / 2.0;
        let centred = TextParams::default().align(Align::Center);
        painter.draw_text("help", centre, at.y + 5.0, centred.scale(3));

        let mut y = at.y + 25.0;
        let body = TextParams::default().color(TEXT);
        for line in GLOSSARY {
            painter.draw_text(line, at.x + 5.0, y, body);
            y += LINE;
        }

        y += 10.0;
        painter.draw_text("objective", centre, y, centred.scale(2));
        y += 19.0;
        painter.draw_text("defeat all of the creatures that come to our world", centre, y, centred);
        y += LINE;
        painter.draw_text("or find another way to end the onslaught...", centre, y, centred);
    }
}
