use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::animation::state::{FrameTicker, Playback};
use crate::env::detect::RenderMode;
use crate::foundation::core::Canvas;
use crate::foundation::error::{TrajviewError, TrajviewResult};
use crate::render::present::{Presenter, RenderOutcome};
use crate::render::session::RenderSession;

const DEFAULT_TITLE: &str = "Trajectory Visualization";

/// Interactive presenter: loops the animation in a window until the user closes it.
pub struct WindowPresenter {
    title: String,
}

impl WindowPresenter {
    /// Presenter with the default window title.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Presenter with a custom window title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for WindowPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for WindowPresenter {
    fn mode(&self) -> RenderMode {
        RenderMode::Interactive
    }

    fn present(&mut self, session: &mut RenderSession) -> TrajviewResult<RenderOutcome> {
        let event_loop = EventLoop::new()
            .map_err(|e| TrajviewError::display(format!("failed to create event loop: {e}")))?;
        let mut app = WindowApp::new(session, &self.title);
        event_loop
            .run_app(&mut app)
            .map_err(|e| TrajviewError::display(format!("event loop failed: {e}")))?;

        if let Some(err) = app.error.take() {
            return Err(err);
        }
        Ok(RenderOutcome::Displayed {
            frames_shown: app.frames_shown,
        })
    }
}

struct WindowState {
    window: Rc<Window>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    _context: softbuffer::Context<Rc<Window>>,
    ticker: FrameTicker,
}

struct WindowApp<'a> {
    session: &'a mut RenderSession,
    title: String,
    state: Option<WindowState>,
    frames_shown: u64,
    error: Option<TrajviewError>,
}

impl<'a> WindowApp<'a> {
    fn new(session: &'a mut RenderSession, title: &str) -> Self {
        Self {
            session,
            title: title.to_string(),
            state: None,
            frames_shown: 0,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: TrajviewError) {
        tracing::error!(error = %err, "closing window after error");
        self.error = Some(err);
        event_loop.exit();
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> TrajviewResult<WindowState> {
        let canvas = self.session.opts().canvas;
        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(canvas.width, canvas.height));
        let window = Rc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| TrajviewError::display(format!("failed to create window: {e}")))?,
        );

        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| TrajviewError::display(format!("failed to create surface context: {e}")))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| TrajviewError::display(format!("failed to create surface: {e}")))?;

        let animation = self.session.animation(Playback::Loop);
        let ticker = FrameTicker::new(animation, self.session.opts().frame_interval, Instant::now());
        Ok(WindowState {
            window,
            surface,
            _context: context,
            ticker,
        })
    }

    fn redraw(&mut self) -> TrajviewResult<()> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let size = state.window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            // Minimized.
            return Ok(());
        };
        state
            .surface
            .resize(w, h)
            .map_err(|e| TrajviewError::display(format!("failed to resize surface: {e}")))?;

        let canvas = Canvas::new(size.width, size.height)?;
        let frame_idx = state.ticker.state().current();
        let frame = self.session.render_frame_sized(frame_idx, canvas)?;
        let bg = self.session.opts().palette.background;
        let rgba = frame.to_opaque_rgba8([bg.r, bg.g, bg.b]);

        let mut buffer = state
            .surface
            .buffer_mut()
            .map_err(|e| TrajviewError::display(format!("failed to map surface buffer: {e}")))?;
        for (dst, px) in buffer.iter_mut().zip(rgba.chunks_exact(4)) {
            *dst = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
        }
        buffer
            .present()
            .map_err(|e| TrajviewError::display(format!("failed to present frame: {e}")))?;

        self.frames_shown += 1;
        tracing::trace!(frame = frame_idx.0, "frame presented");
        Ok(())
    }
}

impl ApplicationHandler for WindowApp<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                event_loop.set_control_flow(ControlFlow::WaitUntil(state.ticker.next_tick()));
                self.state = Some(state);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!(frames = self.frames_shown, "window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                if let Some(state) = &self.state {
                    state.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_mut() {
            if state.ticker.poll(Instant::now()) {
                state.window.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(state.ticker.next_tick()));
        }
    }
}
