/// Packed straight-alpha colour, laid out as `0xAABBGGRR`.
///
/// This is the exact vertex colour format consumed by the sprite shader
/// (`unorm8x4` read little-endian as `r, g, b, a`), so a `Color` is copied
/// into vertices without conversion. Channel setters recompose the packed
/// value from the stored bytes.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const TRANSPARENT: Color = Color(0x0000_0000);

    #[inline]
    pub const fn from_abgr(packed: u32) -> Self {
        Self(packed)
    }

    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | r as u32)
    }

    #[inline]
    pub const fn abgr(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub fn set_r(&mut self, r: u8) {
        *self = Color::from_rgba(r, self.g(), self.b(), self.a());
    }

    #[inline]
    pub fn set_g(&mut self, g: u8) {
        *self = Color::from_rgba(self.r(), g, self.b(), self.a());
    }

    #[inline]
    pub fn set_b(&mut self, b: u8) {
        *self = Color::from_rgba(self.r(), self.g(), b, self.a());
    }

    #[inline]
    pub fn set_a(&mut self, a: u8) {
        *self = Color::from_rgba(self.r(), self.g(), self.b(), a);
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Color::from_rgba(self.r(), self.g(), self.b(), a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color(0x{:08X})", self.0)
    }
}

/// Opaque background colour with 0-255 channels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear clear colour for the render pass.
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64 / 255.0,
            g: self.g as f64 / 255.0,
            b: self.b as f64 / 255.0,
            a: 1.0,
        }
    }
}
