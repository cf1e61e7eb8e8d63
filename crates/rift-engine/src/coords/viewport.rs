use super::Vec2;

/// Viewport size in logical pixels.
///
/// Renderers treat this as the coordinate basis for converting logical px
/// positions to NDC in shaders.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Integer-scaled placement of the logical screen inside a physical window.
///
/// The logical surface is scaled by the largest whole factor that fits
/// (never below 1) and centered; the remaining border is cleared.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Letterbox {
    pub logical: Viewport,
    pub scale: u32,
    /// Top-left of the scaled surface, in physical pixels.
    pub offset: Vec2,
    /// Full window size, in physical pixels.
    pub physical: Vec2,
}

impl Letterbox {
    pub fn fit(logical: Viewport, physical_width: u32, physical_height: u32) -> Self {
        let sx = physical_width as f32 / logical.width;
        let sy = physical_height as f32 / logical.height;
        let scale = (sx.min(sy).floor() as u32).max(1);

        let w = logical.width * scale as f32;
        let h = logical.height * scale as f32;
        let offset = Vec2::new(
            ((physical_width as f32 - w) / 2.0).floor(),
            ((physical_height as f32 - h) / 2.0).floor(),
        );

        Self {
            logical,
            scale,
            offset,
            physical: Vec2::new(physical_width as f32, physical_height as f32),
        }
    }

    /// Size of the scaled surface in physical pixels.
    #[inline]
    pub fn scaled_size(self) -> Vec2 {
        self.logical.size() * self.scale as f32
    }

    /// Scaled surface clipped to the window, as `(x, y, w, h)` physical pixels.
    ///
    /// Only differs from `offset`/`scaled_size` when the window is smaller
    /// than the logical screen.
    pub fn clipped_rect(self) -> (f32, f32, f32, f32) {
        let x = self.offset.x.max(0.0);
        let y = self.offset.y.max(0.0);
        let size = self.scaled_size();
        let w = size.x.min(self.physical.x - x).max(1.0);
        let h = size.y.min(self.physical.y - y).max(1.0);
        (x, y, w, h)
    }

    /// Maps a physical window position into logical screen space, clamped to
    /// `[0, W-1] x [0, H-1]`.
    pub fn to_logical(self, physical: Vec2) -> Vec2 {
        let p = ((physical - self.offset) / self.scale as f32).trunc();
        p.clamp(
            Vec2::zero(),
            Vec2::new(self.logical.width - 1.0, self.logical.height - 1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Viewport = Viewport::new(512.0, 288.0);

    #[test]
    fn fit_picks_largest_whole_scale() {
        let lb = Letterbox::fit(SCREEN, 1600, 900);
        assert_eq!(lb.scale, 3);
        assert_eq!(lb.offset, Vec2::new(32.0, 18.0));
    }

    #[test]
    fn fit_never_scales_below_one() {
        let lb = Letterbox::fit(SCREEN, 300, 200);
        assert_eq!(lb.scale, 1);
    }

    #[test]
    fn clipped_rect_stays_inside_small_windows() {
        let lb = Letterbox::fit(SCREEN, 300, 200);
        assert_eq!(lb.clipped_rect(), (0.0, 0.0, 300.0, 200.0));
    }

    #[test]
    fn to_logical_removes_border_and_scale() {
        let lb = Letterbox::fit(SCREEN, 1600, 900);
        assert_eq!(lb.to_logical(Vec2::new(32.0 + 30.0, 18.0 + 9.0)), Vec2::new(10.0, 3.0));
    }

    #[test]
    fn to_logical_clamps_into_screen() {
        let lb = Letterbox::fit(SCREEN, 1024, 576);
        assert_eq!(lb.to_logical(Vec2::new(-50.0, 5000.0)), Vec2::new(0.0, 287.0));
    }
}
