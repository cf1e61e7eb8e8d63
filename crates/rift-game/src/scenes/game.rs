//! The table: creatures along the top, the store and funding across the
//! middle, the hand along the bottom, and the turn HUD on the right.

use rift_engine::coords::Vec2;
use rift_engine::paint::Color;
use rift_engine::render::Painter;
use rift_engine::text::{Align, Font, TextParams};
use rift_engine::time::Tick;
use rift_scene::widgets::{button_node, Button};
use rift_scene::{Completion, Node, NodeCx, NodeId, Scene, SceneBehavior, Stage};

use super::{below, new_stage, slide_in, slide_out, GAME, HELP};
use crate::context::GameCtx;
use crate::nodes::{
    DeckNode, DiscardPileNode, EncountersNode, HandNode, PermanentsNode, StoreDiscardNode, StoreNode, CARD_SIZE,
};
use crate::phase;
use crate::state::{GameState, Phase, PlayerMode};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const W: f32 = SCREEN_WIDTH;
const H: f32 = SCREEN_HEIGHT;

const BAND: Color = Color(0x3300_0000);
const DISABLED: Color = Color(0xFF2D_2D2D);
const GREEN: Color = Color(0xFF44_8844);
const BLUE: Color = Color(0xFF44_44CC);
const PHASE_IDLE: Color = Color(0xFF20_2020);
const TEXT: Color = Color(0xFFEE_EEEE);
const RATE: Color = Color(0xCCEE_EEEE);
const MODE_SHADE: Color = Color(0x8800_0000);

/// Ids of the nodes the scene reads back each frame.
pub struct GameScene {
    store: NodeId,
    end_turn: NodeId,
    refresh: NodeId,
    upgrade: NodeId,
    help: NodeId,
}

fn can_act(game: &GameState) -> bool {
    game.phase == Phase::Player && game.mode == PlayerMode::Play
}

impl GameScene {
    pub fn build() -> Scene<GameCtx> {
        let mut stage = new_stage();
        let root = stage.root();
        let tree = &mut stage.tree;

        tree.spawn_in_with(root, Node::new(CARD_SIZE).at(0.0, 1.0), DeckNode::encounter_deck());
        EncountersNode::spawn(tree, root, 34.0, 1.0);
        let store = StoreNode::spawn(tree, root, 0.0, H / 2.0 - 24.0);
        tree.spawn_in_with(root, Node::new(CARD_SIZE).at(272.0, H / 2.0 - 24.0), StoreDiscardNode);
        PermanentsNode::spawn(tree, root, 0.0, 185.0);
        HandNode::spawn(tree, root, 34.0, H - 48.0);
        tree.spawn_in_with(root, Node::new(CARD_SIZE).at(0.0, H - 48.0), DeckNode::player_deck());
        tree.spawn_in_with(root, Node::new(CARD_SIZE).at(374.0, H - 48.0), DiscardPileNode);

        let end_turn = tree.spawn_in_with(
            root,
            button_node(W - 112.0, H / 2.0 - 24.0, Vec2::new(110.0, 48.0), GREEN),
            Button::new("end turn", |cx: &mut NodeCx<'_, GameCtx>| {
                if can_act(&cx.ctx.game) {
                    phase::set_phase(&mut cx.ctx.game, Phase::Rift);
                }
            }),
        );
        let refresh = tree.spawn_in_with(
            root,
            button_node(207.0, H / 2.0 - 22.0, Vec2::new(60.0, 20.0), BLUE),
            Button::new("refresh", |cx: &mut NodeCx<'_, GameCtx>| {
                if can_act(&cx.ctx.game) && cx.ctx.game.refresh_store() {
                    log::debug!("store refreshed");
                }
            })
            .text_scale(1),
        );
        let upgrade = tree.spawn_in_with(
            root,
            button_node(207.0, H / 2.0 + 2.0, Vec2::new(60.0, 20.0), GREEN),
            Button::new("upgrade", |cx: &mut NodeCx<'_, GameCtx>| {
                if can_act(&cx.ctx.game) && cx.ctx.game.upgrade_store() {
                    log::debug!("store upgraded");
                }
            })
            .text_scale(1),
        );
        let help = tree.spawn_in_with(
            root,
            button_node(W - 80.0, H - 17.0, Vec2::new(60.0, 16.0), GREEN),
            Button::new("help!", |cx: &mut NodeCx<'_, GameCtx>| {
                if can_act(&cx.ctx.game) {
                    cx.ctx.nav.push(HELP);
                }
            })
            .text_scale(1),
        );

        let behavior = GameScene { store, end_turn, refresh, upgrade, help };
        Scene::new(GAME, stage, behavior)
    }

    fn paint_buttons(&self, stage: &mut Stage<GameCtx>, game: &GameState) {
        let active = can_act(game);
        let funded = active && game.money >= 1;
        let colours = [
            (self.end_turn, if active { GREEN } else { DISABLED }),
            (self.help, if active { GREEN } else { DISABLED }),
            (self.refresh, if funded { BLUE } else { DISABLED }),
            (self.upgrade, if funded { GREEN } else { DISABLED }),
        ];
        for (id, colour) in colours {
            if let Some(node) = stage.tree.node_mut(id) {
                node.color = colour;
            }
        }
    }

    fn is_hovered(stage: &Stage<GameCtx>, id: NodeId) -> bool {
        stage.tree.node(id).is_some_and(|n| n.is_hovered())
    }
}

fn stability_colour(game: &GameState) -> Color {
    let ratio = game.rift_stability as f32 / game.rift_stability_max.max(1) as f32;
    if ratio >= 0.75 {
        Color(0xFFCC_CCFF)
    } else if ratio >= 0.5 {
        Color(0xFFCC_FFFF)
    } else {
        Color(0xFFCC_FFCC)
    }
}

impl SceneBehavior<GameCtx> for GameScene {
    fn transition_in(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx) -> Completion {
        slide_in(stage, ctx, below(), |_, ctx: &mut GameCtx| {
            if matches!(ctx.game.phase, Phase::Pregame | Phase::GameOver) {
                phase::set_phase(&mut ctx.game, Phase::Begin);
            }
            Completion::done()
        })
    }

    fn transition_out(&mut self, stage: &mut Stage<GameCtx>, _ctx: &mut GameCtx) -> Completion {
        slide_out(stage, below())
    }

    fn update(&mut self, stage: &mut Stage<GameCtx>, ctx: &mut GameCtx, _tick: Tick) {
        if ctx.game.top_up_store() {
            log::trace!("store topped up to {}", ctx.game.store_active.len());
        }
        self.paint_buttons(stage, &ctx.game);
        phase::update(stage, ctx);
    }

    fn draw(&self, stage: &Stage<GameCtx>, ctx: &GameCtx, painter: &mut Painter<'_>) {
        let at = stage.tree.top_left(stage.root());
        let game = &ctx.game;

        painter.draw_quad(at.x, at.y, W, 51.0, BAND);
        painter.draw_quad(at.x, at.y + H - 110.0, W, 110.0, BAND);
        painter.draw_quad(at.x, at.y + H / 2.0 - 25.0, W, 50.0, BAND);

        let gb = TextParams::default().align(Align::Center).font(Font::Gb);
        let hud_x = at.x + W - 69.0;
        painter.draw_text("Rift Stability", hud_x, at.y + 6.0, gb);
        let stability = format!("{:02}/{}", game.rift_stability, game.rift_stability_max);
        painter.draw_text(&stability, hud_x, at.y + 16.0, gb.scale(3).color(stability_colour(game)));
        let rate = format!("Stab. Rate: +{}", game.stability_rate());
        painter.draw_text(&rate, hud_x, at.y + 41.0, gb.color(RATE));

        let label = TextParams::default().align(Align::Center).color(TEXT);
        for (i, step) in Phase::TURN.into_iter().enumerate() {
            let y = at.y + H - 105.0 + i as f32 * 10.0;
            let fill = if game.phase == step { GREEN } else { PHASE_IDLE };
            painter.draw_quad(at.x + W - 92.0, y - 2.0, 85.0, 9.0, fill);
            painter.draw_text(&format!("{} phase", step.label()), at.x + W - 50.0, y, label);
        }

        let turn = TextParams::default().align(Align::Center).scale(2);
        painter.draw_text(&format!("turn {}", game.turn), at.x + W - 50.0, at.y + H - 38.0, turn);
    }

    fn draw_over(&self, stage: &Stage<GameCtx>, ctx: &GameCtx, painter: &mut Painter<'_>) {
        let at = stage.tree.top_left(stage.root());
        let game = &ctx.game;

        let gb = TextParams::default().font(Font::Gb);
        let mid = at.y + H / 2.0;
        painter.draw_text("Funding", at.x + W - 160.0, mid - 18.0, gb.align(Align::Center));
        painter.draw_texture_scaled("money_icon", at.x + W - 198.0, mid - 4.0, 3.0, 3.0);
        painter.draw_text("X", at.x + W - 167.0, mid + 6.0, gb);
        painter.draw_text(&format!("{:02}", game.money), at.x + W - 155.0, mid + 1.0, gb.scale(2));

        let store_at = stage.tree.top_left(self.store);
        if Self::is_hovered(stage, self.refresh) {
            StoreNode::draw_action_tooltip(painter, store_at, "replace the cards in hq", game.money);
        } else if Self::is_hovered(stage, self.upgrade) {
            StoreNode::draw_action_tooltip(painter, store_at, "upgrade the cards in hq", game.money);
        }

        if game.phase == Phase::Player && game.mode != PlayerMode::Play {
            painter.draw_quad(at.x, at.y, W, H - 110.0, MODE_SHADE);
            let prompt = match game.mode {
                PlayerMode::Destroy => format!("destroy {} more cards", game.destroys_required),
                _ => format!("discard {} more cards", game.discards_required),
            };
            let params = TextParams::default().align(Align::Center).scale(3);
            painter.draw_text(&prompt, at.x + W / 2.0, mid, params);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::testing::{ctx, draw_strict};
    use crate::scenes::testing::{click, manager, run};
    use crate::state::DRAW_PER_TURN;
    use pretty_assertions::assert_eq;
    use rift_scene::{NavRequest, SceneManager};

    fn started() -> (SceneManager<GameCtx>, GameCtx, f64) {
        let mut manager = manager();
        let mut ctx = ctx();
        ctx.game.generate_store();
        ctx.nav.push(GAME);
        let now = run(&mut manager, &mut ctx, 0.0, 3000.0);
        (manager, ctx, now)
    }

    // Colour of the topmost node under `(x, y)`.
    fn colour_at(manager: &SceneManager<GameCtx>, x: f32, y: f32) -> Color {
        let tree = &manager.scene(GAME).unwrap().stage.tree;
        let top = *tree.nodes_at(Vec2::new(x, y)).last().unwrap();
        tree.node(top).unwrap().color
    }

    #[test]
    fn the_first_turn_reaches_the_player_phase() {
        let (_, ctx, _) = started();
        assert_eq!(ctx.game.turn, 1);
        assert_eq!(ctx.game.phase, Phase::Player);
        assert_eq!(ctx.game.player_hand.len(), DRAW_PER_TURN);
        assert_eq!(ctx.game.encounters_active.len(), 1);
        assert_eq!(ctx.game.store_active.len(), 5);
    }

    #[test]
    fn store_buttons_grey_out_without_funding() {
        let (mut manager, mut ctx, now) = started();
        assert_eq!(colour_at(&manager, 237.0, 130.0), DISABLED);
        assert_eq!(colour_at(&manager, W - 57.0, 144.0), GREEN);

        ctx.game.money = 3;
        run(&mut manager, &mut ctx, now + 16.0, now + 16.0);
        assert_eq!(colour_at(&manager, 237.0, 130.0), BLUE);
        assert_eq!(colour_at(&manager, 237.0, 154.0), GREEN);
    }

    #[test]
    fn refresh_spends_funding_and_clears_the_store() {
        let (mut manager, mut ctx, _) = started();
        ctx.game.money = 2;
        click(&mut manager, &mut ctx, 237.0, 130.0);
        assert_eq!(ctx.game.money, 1);
        assert!(ctx.game.store_active.is_empty());
        assert_eq!(ctx.game.store_discard_queue.len(), 5);
    }

    #[test]
    fn end_turn_hands_over_to_the_rift() {
        let (mut manager, mut ctx, _) = started();
        click(&mut manager, &mut ctx, W - 57.0, 144.0);
        assert_eq!(ctx.game.phase, Phase::Rift);

        // outside the player phase nothing reacts
        click(&mut manager, &mut ctx, W - 50.0, H - 9.0);
        assert!(ctx.nav.is_empty());
    }

    #[test]
    fn help_opens_during_the_player_phase() {
        let (mut manager, mut ctx, _) = started();
        click(&mut manager, &mut ctx, W - 50.0, H - 9.0);
        let pending: Vec<NavRequest> = ctx.nav.pending().cloned().collect();
        assert_eq!(pending, [NavRequest::Push(HELP.to_string())]);
    }

    #[test]
    fn the_table_draws_from_the_built_in_atlas() {
        let (manager, ctx, _) = started();
        let (batch, fault) = draw_strict(|painter| manager.draw(&ctx, painter));
        assert_eq!(fault, None);
        assert!(!batch.batches().is_empty());
    }
}
