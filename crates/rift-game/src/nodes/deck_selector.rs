use rift_engine::paint::Color;
use rift_engine::text::TextParams;
use rift_scene::{Behavior, DrawCx, Interactive, NodeCx};

use crate::context::GameCtx;
use crate::decks::DeckSet;

const SHADOW: Color = Color(0xCC00_0000);
const PICKED: Color = Color(0xFF20_2020);
const HOVERED: Color = Color(0xFFAA_AAAA);

/// Toggle for one research set: a framed bar in the node's colour with a
/// check box and the set's name.
pub struct DeckSelectorNode {
    set: DeckSet,
    picked: bool,
}

impl DeckSelectorNode {
    pub fn new(set: DeckSet) -> Self {
        Self { set, picked: false }
    }

    pub fn is_picked(&self) -> bool {
        self.picked
    }
}

impl Behavior<GameCtx> for DeckSelectorNode {
    fn update(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        self.picked = cx.ctx.game.decks_picked.contains(&self.set);
    }

    fn draw(&self, cx: &mut DrawCx<'_, '_, GameCtx>) {
        let Some(node) = cx.node() else { return };
        let (size, fill, hovered) = (node.size, node.color, node.is_hovered());
        let at = cx.top_left();
        let marker = (size.y / 2.0).trunc();
        let inset = (marker / 2.0).trunc();

        cx.painter.draw_quad(at.x, at.y, size.x, size.y, Color::WHITE);
        cx.painter.draw_quad(at.x + 1.0, at.y + 1.0, size.x - 2.0, size.y - 2.0, fill);
        cx.painter.draw_quad(at.x + inset, at.y + inset, marker, marker, Color::WHITE);

        let text_x = at.x + marker * 2.0;
        let text_y = at.y + size.y / 2.0 - 5.0;
        let params = TextParams::default().scale(2);
        cx.painter.draw_text(self.set.label(), text_x, text_y + 1.0, params.color(SHADOW));
        cx.painter.draw_text(self.set.label(), text_x, text_y, params);

        let check = if self.picked {
            Some(PICKED)
        } else if hovered {
            Some(HOVERED)
        } else {
            None
        };
        if let Some(color) = check {
            cx.painter.draw_quad(at.x + inset + 3.0, at.y + inset + 3.0, marker - 6.0, marker - 6.0, color);
        }
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive<GameCtx>> {
        Some(self)
    }
}

impl Interactive<GameCtx> for DeckSelectorNode {
    fn on_hover(&mut self, _cx: &mut NodeCx<'_, GameCtx>, _mouse_down: bool) {}

    fn on_blur(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_down(&mut self, _cx: &mut NodeCx<'_, GameCtx>) {}

    fn on_mouse_up(&mut self, cx: &mut NodeCx<'_, GameCtx>) {
        cx.ctx.game.toggle_deck(self.set);
        self.picked = cx.ctx.game.decks_picked.contains(&self.set);
        log::debug!("research sets: {:?}", cx.ctx.game.decks_picked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::testing::{ctx, stage};
    use crate::state::Difficulty;
    use pretty_assertions::assert_eq;
    use rift_engine::coords::Vec2;
    use rift_scene::Node;

    #[test]
    fn clicking_toggles_within_the_difficulty_limit() {
        let mut stage = stage();
        let mut ctx = ctx();
        ctx.game.setup_game(Difficulty::Hard);
        let root = stage.root();
        let size = Vec2::new(270.0, 30.0);
        let occult = stage.tree.spawn_in_with(root, Node::new(size).at(0.0, 0.0), DeckSelectorNode::new(DeckSet::Occult));
        stage.tree.spawn_in_with(root, Node::new(size).at(0.0, 40.0), DeckSelectorNode::new(DeckSet::Psychic));

        let click = |stage: &mut rift_scene::Stage<GameCtx>, ctx: &mut GameCtx, y: f32| {
            stage.pointer_down(ctx, Vec2::new(100.0, y), true);
            stage.pointer_up(ctx);
        };

        click(&mut stage, &mut ctx, 10.0);
        assert_eq!(ctx.game.decks_picked, [DeckSet::Occult]);
        assert!(stage.tree.behavior::<DeckSelectorNode>(occult).unwrap().is_picked());

        click(&mut stage, &mut ctx, 50.0);
        assert_eq!(ctx.game.decks_picked, [DeckSet::Psychic]);

        click(&mut stage, &mut ctx, 50.0);
        assert!(ctx.game.decks_picked.is_empty());
    }
}
