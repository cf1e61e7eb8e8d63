use rift_engine::coords::Vec2;
use rift_engine::interp::{Easing, Interpolator};
use rift_engine::paint::Color;

use crate::completion::Resolver;
use crate::id::NodeId;

/// Rounds half away toward positive infinity, matching pixel snapping used
/// by every tween.
#[inline]
pub(crate) fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// In-flight tween on one node channel.
#[derive(Debug)]
pub(crate) struct Tween<T> {
    pub(crate) from: T,
    pub(crate) to: T,
    interp: Interpolator,
    resolver: Option<Resolver>,
}

impl<T: Copy> Tween<T> {
    pub(crate) fn new(from: T, to: T, duration: f64, easing: Easing, resolver: Resolver) -> Self {
        Self {
            from,
            to,
            interp: Interpolator::new(duration, easing),
            resolver: Some(resolver),
        }
    }

    /// Advances to `now`; returns the eased progress and whether it finished.
    pub(crate) fn step(&mut self, now: f64) -> (f64, bool) {
        let step = self.interp.step(now);
        if step.done {
            if let Some(resolver) = self.resolver.take() {
                resolver.resolve();
            }
        }
        (step.value, step.done)
    }
}

fn lerp_px(from: f32, to: f32, v: f64) -> f32 {
    from + round_half_up((to - from) as f64 * v) as f32
}

/// Positional and visual state of one scene node.
///
/// Structure (parent, children, origin, enablement) is owned by the
/// [`NodeTree`](crate::NodeTree) and changed through it; `anchor`, `size`
/// and `color` are free to edit.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) enabled: bool,
    pub(crate) visible: bool,
    pub(crate) origin: Vec2,
    /// Fraction of `size - 1` the top-left is shifted back from the origin.
    pub anchor: Vec2,
    pub size: Vec2,
    /// Tint; the alpha channel is what `fade` animates.
    pub color: Color,
    pub(crate) movement: Option<Tween<Vec2>>,
    pub(crate) fade: Option<Tween<u8>>,
    pub(crate) hovered: bool,
    pub(crate) pressed: bool,
}

impl Node {
    pub fn new(size: Vec2) -> Self {
        Self {
            id: NodeId::next(),
            parent: None,
            children: Vec::new(),
            enabled: true,
            visible: true,
            origin: Vec2::zero(),
            anchor: Vec2::zero(),
            size,
            color: Color::WHITE,
            movement: None,
            fade: None,
            hovered: false,
            pressed: false,
        }
    }

    // ── builders ──────────────────────────────────────────────────────────

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.origin = Vec2::new(x, y);
        self
    }

    pub fn anchor(mut self, x: f32, y: f32) -> Self {
        self.anchor = Vec2::new(x, y);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Position relative to the parent's origin.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn alpha(&self) -> u8 {
        self.color.a()
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.movement.is_some()
    }

    #[inline]
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Drops the hover flag until the next pointer move finds the node again.
    pub fn unhover(&mut self) {
        self.hovered = false;
    }

    // ── tweens ────────────────────────────────────────────────────────────

    pub(crate) fn step_fade(&mut self, now: f64) {
        let Some(fade) = self.fade.as_mut() else { return };
        let (v, done) = fade.step(now);
        let alpha = if done {
            fade.to
        } else {
            let a = fade.from as f64 + round_half_up((fade.to as f64 - fade.from as f64) * v);
            a.clamp(0.0, 255.0) as u8
        };
        self.color.set_a(alpha);
        if done {
            self.fade = None;
        }
    }

    /// Returns true when the origin changed.
    pub(crate) fn step_movement(&mut self, now: f64) -> bool {
        let Some(movement) = self.movement.as_mut() else { return false };
        let (v, done) = movement.step(now);
        let next = if done {
            movement.to
        } else {
            Vec2::new(
                lerp_px(movement.from.x, movement.to.x, v),
                lerp_px(movement.from.y, movement.to.y, v),
            )
        };
        if done {
            self.movement = None;
        }
        let changed = next != self.origin;
        self.origin = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Completion;
    use pretty_assertions::assert_eq;

    #[test]
    fn js_rounding_goes_up_on_half() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }

    #[test]
    fn movement_snaps_to_pixels_and_lands_exactly() {
        let (done, resolver) = Completion::pending();
        let mut n = Node::new(Vec2::splat(4.0)).at(0.0, 0.0);
        n.movement = Some(Tween::new(n.origin, Vec2::new(10.0, -3.0), 100.0, Easing::Linear, resolver));

        n.step_movement(0.0);
        n.step_movement(25.0);
        assert_eq!(n.origin(), Vec2::new(3.0, -1.0));
        assert!(done.is_pending());

        n.step_movement(100.0);
        assert_eq!(n.origin(), Vec2::new(10.0, -3.0));
        assert!(done.is_done());
        assert!(!n.is_moving());
    }

    #[test]
    fn fade_clamps_overshoot() {
        let (_done, resolver) = Completion::pending();
        let mut n = Node::new(Vec2::zero());
        n.fade = Some(Tween::new(255, 0, 100.0, Easing::EaseInBack, resolver));
        n.step_fade(0.0);
        n.step_fade(20.0);
        assert_eq!(n.alpha(), 255);
        n.step_fade(100.0);
        assert_eq!(n.alpha(), 0);
    }
}
