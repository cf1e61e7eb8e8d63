use bytemuck::{Pod, Zeroable};

use crate::paint::{Color, Rgb};

/// Most quads a single batch may hold.
///
/// Four vertices per quad keeps every index of a full batch addressable
/// with a `u16` index buffer.
pub const MAX_BATCH_QUADS: usize = 10922;

/// Handle of a texture uploaded to the sprite renderer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Normalized texture coordinates of a quad.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    #[inline]
    pub const fn new(u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        Self { u0, v0, u1, v1 }
    }
}

/// Vertex layout (20 bytes):
///
///  offset  0  pos    [f32; 2]   loc 0
///  offset  8  uv     [f32; 2]   loc 1
///  offset 16  color  u32        loc 2 (unorm8x4, 0xAABBGGRR)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: u32,
}

impl SpriteVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // uv
        2 => Unorm8x4   // color
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// One textured quad draw request.
///
/// The drawn size is `w * sx` by `h * sy`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub texture: TextureId,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub uv: UvRect,
    pub sx: f32,
    pub sy: f32,
}

/// A run of quads sharing one texture, ready for a single draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub texture: TextureId,
    pub vertices: Vec<SpriteVertex>,
}

impl Batch {
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// CPU-side quad batcher.
///
/// Quads accumulate until the bound texture changes or the batch nears
/// [`MAX_BATCH_QUADS`], at which point the pending run is closed into a
/// [`Batch`]. `flush` closes the final run of the frame; nothing reaches the
/// GPU before the renderer drains the batches.
///
/// The tint is global state applied to every subsequent quad until changed.
#[derive(Debug)]
pub struct DrawBatch {
    pending: Vec<SpriteVertex>,
    count: usize,
    texture: Option<TextureId>,
    tint: Color,
    background: Rgb,
    flushed: Vec<Batch>,
}

impl Default for DrawBatch {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            count: 0,
            texture: None,
            tint: Color::WHITE,
            background: Rgb::default(),
            flushed: Vec::new(),
        }
    }
}

impl DrawBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, quad: Quad) {
        if self.texture != Some(quad.texture) || self.count + 1 >= MAX_BATCH_QUADS {
            self.flush();
            self.texture = Some(quad.texture);
        }

        let Quad { x, y, uv, .. } = quad;
        let w = quad.w * quad.sx;
        let h = quad.h * quad.sy;
        let color = self.tint.abgr();

        self.pending.extend_from_slice(&[
            SpriteVertex { pos: [x, y], uv: [uv.u0, uv.v0], color },
            SpriteVertex { pos: [x + w, y + h], uv: [uv.u1, uv.v1], color },
            SpriteVertex { pos: [x, y + h], uv: [uv.u0, uv.v1], color },
            SpriteVertex { pos: [x + w, y], uv: [uv.u1, uv.v0], color },
        ]);

        self.count += 1;
        if self.count >= MAX_BATCH_QUADS {
            self.flush();
        }
    }

    /// Closes the pending run. A no-op when nothing is pending.
    pub fn flush(&mut self) {
        if self.count == 0 {
            return;
        }
        let Some(texture) = self.texture else { return; };

        self.flushed.push(Batch {
            texture,
            vertices: std::mem::take(&mut self.pending),
        });
        self.count = 0;
    }

    /// Closed batches, in submission order.
    #[inline]
    pub fn batches(&self) -> &[Batch] {
        &self.flushed
    }

    /// Quads recorded but not yet flushed.
    #[inline]
    pub fn pending_quads(&self) -> usize {
        self.count
    }

    /// Drops all recorded geometry for the next frame. Tint and background
    /// persist.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.flushed.clear();
        self.count = 0;
        self.texture = None;
    }

    #[inline]
    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    #[inline]
    pub fn tint(&self) -> Color {
        self.tint
    }

    #[inline]
    pub fn set_background(&mut self, rgb: Rgb) {
        self.background = rgb;
    }

    #[inline]
    pub fn background(&self) -> Rgb {
        self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ATLAS: TextureId = TextureId(0);
    const OTHER: TextureId = TextureId(1);

    fn quad(texture: TextureId) -> Quad {
        Quad {
            texture,
            x: 10.0,
            y: 20.0,
            w: 4.0,
            h: 2.0,
            uv: UvRect::new(0.0, 0.0, 0.5, 0.25),
            sx: 2.0,
            sy: 3.0,
        }
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn quad_corners_follow_index_pattern_order() {
        let mut b = DrawBatch::new();
        b.push(quad(ATLAS));
        b.flush();

        let v = &b.batches()[0].vertices;
        let pos: Vec<[f32; 2]> = v.iter().map(|v| v.pos).collect();
        assert_eq!(pos, vec![[10.0, 20.0], [18.0, 26.0], [10.0, 26.0], [18.0, 20.0]]);
        assert_eq!(v[1].uv, [0.5, 0.25]);
        assert_eq!(v[3].uv, [0.5, 0.0]);
    }

    #[test]
    fn tint_is_sticky_until_changed() {
        let mut b = DrawBatch::new();
        b.set_tint(Color(0x88000000));
        b.push(quad(ATLAS));
        b.push(quad(ATLAS));
        b.set_tint(Color::WHITE);
        b.push(quad(ATLAS));
        b.flush();

        let colors: Vec<u32> = b.batches()[0].vertices.iter().step_by(4).map(|v| v.color).collect();
        assert_eq!(colors, vec![0x88000000, 0x88000000, 0xFFFFFFFF]);
    }

    // ── flushing ──────────────────────────────────────────────────────────

    #[test]
    fn texture_change_closes_the_run() {
        let mut b = DrawBatch::new();
        b.push(quad(ATLAS));
        b.push(quad(ATLAS));
        b.push(quad(OTHER));
        assert_eq!(b.batches().len(), 1);
        assert_eq!(b.batches()[0].quad_count(), 2);
        assert_eq!(b.pending_quads(), 1);

        b.flush();
        assert_eq!(b.batches()[1].texture, OTHER);
    }

    #[test]
    fn capacity_splits_batches() {
        let mut b = DrawBatch::new();
        for _ in 0..MAX_BATCH_QUADS + 5 {
            b.push(quad(ATLAS));
        }
        b.flush();

        let counts: Vec<usize> = b.batches().iter().map(Batch::quad_count).collect();
        assert_eq!(counts.iter().sum::<usize>(), MAX_BATCH_QUADS + 5);
        assert!(counts.iter().all(|&c| c < MAX_BATCH_QUADS));
    }

    #[test]
    fn empty_flush_records_nothing() {
        let mut b = DrawBatch::new();
        b.flush();
        assert!(b.batches().is_empty());
    }

    #[test]
    fn reset_keeps_background() {
        let mut b = DrawBatch::new();
        b.set_background(Rgb::new(0, 25, 55));
        b.push(quad(ATLAS));
        b.flush();
        b.reset();
        assert!(b.batches().is_empty());
        assert_eq!(b.background(), Rgb::new(0, 25, 55));
    }
}
