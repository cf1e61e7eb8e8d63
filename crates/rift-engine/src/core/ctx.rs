use winit::window::Window;

use crate::coords::{Letterbox, Vec2, Viewport};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::app::AppControl;

/// The game window as seen from one frame.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Window size in physical pixels, never zero.
    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width.max(1), size.height.max(1))
    }

    /// Placement of a `logical` screen inside this window.
    pub fn letterbox(&self, logical: Viewport) -> Letterbox {
        let (w, h) = self.physical_size();
        Letterbox::fit(logical, w, h)
    }
}

/// Everything [`App::on_frame`](super::App::on_frame) gets to see.
///
/// `'a` is the callback; `'w` is the window borrow held by [`Gpu`].
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
}

impl FrameCtx<'_, '_> {
    /// Pointer position in the `logical` screen, if the pointer is over the
    /// window.
    pub fn pointer(&self, logical: Viewport) -> Option<Vec2> {
        let letterbox = self.window.letterbox(logical);
        self.input.pointer_pos.map(|p| letterbox.to_logical(p))
    }

    fn render_ctx(&self, logical: Viewport) -> RenderCtx<'_> {
        RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            logical,
            self.window.letterbox(logical),
        )
    }

    /// Clears the window to black, lets `draw` fill the letterboxed
    /// `logical` screen, then presents.
    ///
    /// A lost or outdated surface skips the frame; only a fatal surface error
    /// asks the loop to exit.
    pub fn render<F>(&mut self, logical: Viewport, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        // The clear pass must end before the encoder is lent to `draw`.
        {
            let _letterbox_clear = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rift letterbox clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        {
            let rctx = self.render_ctx(logical);
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);
        AppControl::Continue
    }

    /// Runs `f` outside any frame, for texture uploads before the first draw.
    pub fn with_render_ctx<R>(&self, logical: Viewport, f: impl FnOnce(&RenderCtx<'_>) -> R) -> R {
        f(&self.render_ctx(logical))
    }
}
