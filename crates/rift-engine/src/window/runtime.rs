use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{translate_window_event, InputFrame, InputState};
use crate::time::FrameClock;

/// How the game window is opened.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Hide the OS cursor over the window; the game draws its own pointer.
    pub hide_cursor: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "rift".to_string(),
            initial_size: LogicalSize::new(1536.0, 864.0),
            hide_cursor: true,
        }
    }
}

/// Runs one window and redraws it continuously until the app exits or the
/// window is closed.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create the event loop")?;
        let mut state = RuntimeState {
            config,
            gpu_init,
            app,
            window: None,
            closed: false,
        };
        event_loop.run_app(&mut state).context("event loop stopped with an error")?;
        Ok(())
    }
}

// The surface borrows the window it presents to, so both live in one cell.
#[self_referencing]
struct GameWindow {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl GameWindow {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);
        let window = event_loop.create_window(attrs).context("failed to create the window")?;
        if config.hide_cursor {
            window.set_cursor_visible(false);
        }

        GameWindowTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    fn resize_to_window(&mut self) {
        let size = self.with_window(|w| w.inner_size());
        self.with_gpu_mut(|gpu| gpu.resize(size));
    }
}

struct RuntimeState<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<GameWindow>,
    closed: bool,
}

impl<A: App + 'static> RuntimeState<A> {
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        if !self.closed {
            self.closed = true;
            self.app.on_close();
            self.window = None;
            log::info!("window closed");
        }
        event_loop.exit();
    }

    fn frame(&mut self) -> AppControl {
        let Some(window) = self.window.as_mut() else {
            return AppControl::Continue;
        };
        let app = &mut self.app;
        window.with_mut(|fields| {
            let time = fields.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx { window: fields.window },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                };
                app.on_frame(&mut ctx)
            };
            fields.input_frame.clear();
            control
        })
    }
}

impl<A: App + 'static> ApplicationHandler for RuntimeState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.closed {
            return;
        }
        match GameWindow::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("{e:#}");
                self.shut_down(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        // Tweens and the pointer sprite move every frame.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_mut().filter(|w| w.id() == window_id) else {
            return;
        };

        window.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        match event {
            WindowEvent::CloseRequested => self.shut_down(event_loop),
            WindowEvent::Resized(size) => {
                window.with_gpu_mut(|gpu| gpu.resize(size));
                window.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                window.resize_to_window();
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if self.frame() == AppControl::Exit {
                    self.shut_down(event_loop);
                }
            }
            _ => {}
        }
    }
}
