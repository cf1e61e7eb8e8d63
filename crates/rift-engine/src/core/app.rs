use super::ctx::FrameCtx;

/// What the runtime does after a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// The game side of the frame loop.
pub trait App {
    /// Called once per redraw of the game window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once when the loop is about to stop, whether the window was
    /// closed or a frame asked to exit.
    fn on_close(&mut self) {}
}
