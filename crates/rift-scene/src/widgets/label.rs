use rift_engine::coords::Vec2;
use rift_engine::text::{text_height, text_width, wrap_lines, Align, TextParams};

use crate::behavior::{Behavior, DrawCx};
use crate::id::NodeId;
use crate::node::Node;
use crate::tree::NodeTree;

/// Static text. The node is sized to the laid-out text and anchored by its
/// alignment so the origin is the left edge, center or right edge.
///
/// The colour comes from the node, so fades apply to the text.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    params: TextParams,
}

impl Label {
    pub fn new(text: impl Into<String>, params: TextParams) -> Self {
        Self { text: text.into(), params }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Pixel size of the text block.
    pub fn measure(&self) -> Vec2 {
        let lines = wrap_lines(&self.text, &self.params);
        let width = if self.params.wrap == 0 {
            text_width(self.text.chars().count(), self.params.scale, self.params.font)
        } else {
            self.params.wrap as f32
        };
        Vec2::new(width, text_height(lines.len(), self.params.scale, self.params.font))
    }

    /// Node at `(x, y)` sized and anchored for this label.
    pub fn node(&self, x: f32, y: f32) -> Node {
        let anchor_x = match self.params.align {
            Align::Left => 0.0,
            Align::Center => 0.5,
            Align::Right => 1.0,
        };
        Node::new(self.measure()).at(x, y).anchor(anchor_x, 0.0).color(self.params.color)
    }

    /// Spawns a label under `parent`.
    pub fn spawn<C: 'static>(
        tree: &mut NodeTree<C>,
        parent: NodeId,
        x: f32,
        y: f32,
        text: impl Into<String>,
        params: TextParams,
    ) -> NodeId {
        let label = Label::new(text, params);
        let node = label.node(x, y);
        tree.spawn_in_with(parent, node, label)
    }

    /// Replaces the text of the label at `id` and resizes its node.
    pub fn set_text<C: 'static>(tree: &mut NodeTree<C>, id: NodeId, text: impl Into<String>) {
        let Some(label) = tree.behavior_mut::<Label>(id) else {
            log::warn!("set_text: {id} is not a label");
            return;
        };
        label.text = text.into();
        let size = label.measure();
        if let Some(node) = tree.node_mut(id) {
            node.size = size;
        }
    }
}

impl<C: 'static> Behavior<C> for Label {
    fn draw(&self, cx: &mut DrawCx<'_, '_, C>) {
        let Some(color) = cx.node().map(|n| n.color) else { return };
        let at = cx.absolute_origin();
        cx.painter.draw_text(&self.text, at.x, at.y, self.params.color(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestCtx;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line_size_follows_the_text() {
        let label = Label::new("skip", TextParams::default().scale(2));
        assert_eq!(label.measure(), Vec2::new(48.0, 14.0));
    }

    #[test]
    fn wrapped_width_is_the_wrap_width() {
        let label = Label::new("aaa bbb cc", TextParams::default().wrap(40));
        assert_eq!(label.measure(), Vec2::new(40.0, 14.0));
    }

    #[test]
    fn centered_label_is_anchored_at_its_middle() {
        let mut tree: NodeTree<TestCtx> = NodeTree::new(Vec2::new(512.0, 288.0));
        let root = tree.root();
        let id = Label::spawn(&mut tree, root, 256.0, 10.0, "abc", TextParams::default().align(Align::Center));
        // 18 px wide: 256 + trunc(0.5 * -17)
        assert_eq!(tree.top_left(id), Vec2::new(248.0, 10.0));
    }

    #[test]
    fn set_text_resizes() {
        let mut tree: NodeTree<TestCtx> = NodeTree::new(Vec2::new(512.0, 288.0));
        let root = tree.root();
        let id = Label::spawn(&mut tree, root, 0.0, 0.0, "1", TextParams::default());
        Label::set_text(&mut tree, id, "100");
        assert_eq!(tree.node(id).map(|n| n.size), Some(Vec2::new(18.0, 7.0)));
        assert_eq!(tree.behavior::<Label>(id).map(Label::text), Some("100"));
    }
}
