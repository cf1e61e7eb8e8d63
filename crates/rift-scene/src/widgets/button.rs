use rift_engine::coords::Vec2;
use rift_engine::paint::Color;
use rift_engine::text::{Align, TextParams};

use crate::behavior::{Behavior, DrawCx, Interactive, NodeCx};
use crate::node::Node;

const SHADOW: Color = Color(0xCC00_0000);
const EDGE: Color = Color(0xBB00_0000);

type OnClick<C> = Box<dyn FnMut(&mut NodeCx<'_, C>)>;

/// Flat push button with a centered caption (scale 2 unless changed).
///
/// The face sinks by one pixel while hovered and by two while pressed, and
/// the darker bottom edge shrinks accordingly.
pub struct Button<C> {
    pub label: String,
    text_scale: u32,
    on_click: OnClick<C>,
}

impl<C: 'static> Button<C> {
    pub fn new(label: impl Into<String>, on_click: impl FnMut(&mut NodeCx<'_, C>) + 'static) -> Self {
        Self {
            label: label.into(),
            text_scale: 2,
            on_click: Box::new(on_click),
        }
    }

    pub fn text_scale(mut self, scale: u32) -> Self {
        self.text_scale = scale.max(1);
        self
    }
}

/// A node of `size` at `(x, y)` filled with `fill`, ready for a [`Button`].
pub fn button_node(x: f32, y: f32, size: Vec2, fill: Color) -> Node {
    Node::new(size).at(x, y).color(fill)
}

impl<C: 'static> Behavior<C> for Button<C> {
    fn draw(&self, cx: &mut DrawCx<'_, '_, C>) {
        let Some(node) = cx.node() else { return };
        let (size, fill) = (node.size, node.color);
        let sink = if node.is_pressed() && node.is_hovered() {
            2.0
        } else if node.is_hovered() {
            1.0
        } else {
            0.0
        };
        let tl = cx.top_left();

        cx.painter.draw_quad(tl.x, tl.y + sink, size.x, size.y - sink, fill);

        let text_x = tl.x + size.x / 2.0;
        let half_glyph = 3.0 * self.text_scale as f32;
        let text_y = (tl.y + size.y / 2.0 - half_glyph).trunc() + sink;
        let params = TextParams::default().align(Align::Center).scale(self.text_scale);
        cx.painter.draw_text(&self.label, text_x, text_y + 1.0, params.color(SHADOW));
        cx.painter.draw_text(&self.label, text_x, text_y, params);

        let edge = 2.0 - sink;
        if edge > 0.0 {
            cx.painter.draw_quad(tl.x, tl.y + size.y - edge, size.x, edge, EDGE);
        }
    }

    fn interactive(&mut self) -> Option<&mut dyn Interactive<C>> {
        Some(self)
    }
}

impl<C: 'static> Interactive<C> for Button<C> {
    fn on_hover(&mut self, _cx: &mut NodeCx<'_, C>, _mouse_down: bool) {}

    fn on_blur(&mut self, _cx: &mut NodeCx<'_, C>) {}

    fn on_mouse_down(&mut self, _cx: &mut NodeCx<'_, C>) {}

    fn on_mouse_up(&mut self, cx: &mut NodeCx<'_, C>) {
        (self.on_click)(cx);
    }
}
