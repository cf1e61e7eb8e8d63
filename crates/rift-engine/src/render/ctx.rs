use crate::coords::{Letterbox, Viewport};

/// What a renderer needs to build pipelines, upload textures and place the
/// logical screen on the surface.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// The logical screen; quads are positioned in its pixels.
    pub viewport: Viewport,
    pub letterbox: Letterbox,
}

impl<'a> RenderCtx<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        letterbox: Letterbox,
    ) -> Self {
        Self { device, queue, surface_format, viewport, letterbox }
    }
}

/// The encoder and swapchain view of the frame being recorded.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}
