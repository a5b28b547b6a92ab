//! Standalone city walk window backed by winit.
//!
//! The window title doubles as the page chrome: it shows the speed
//! indicator, the motion toggle label, and the text-panel toggle label.
//! When the text panel is expanded, the billboards' text alternative is
//! written to the log.
//!
//! ```no_run
//! # use citywalk::Viewer;
//! Viewer::builder()
//!     .with_title("City Walk")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    camera::CommandEffect,
    error::CityError,
    gpu::render_context::RenderContext,
    input::InputEvent,
    options::Options,
    renderer::{scene_renderer::SceneRenderer, RenderBackend},
    session::Session,
    ui::UiSurface,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "City Walk".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the base window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that mounts a city walk session.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`CityError::Viewer`] if the event loop fails, or the error
    /// that prevented the session from mounting.
    pub fn run(self) -> Result<(), CityError> {
        let event_loop =
            EventLoop::new().map_err(|e| CityError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            renderer: None,
            session: None,
            ui: TitleBar::new(self.title),
            options: Some(self.options),
            failure: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| CityError::Viewer(e.to_string()))?;
        app.failure.map_or(Ok(()), Err)
    }
}

// ── Title bar chrome ─────────────────────────────────────────────────────

/// [`UiSurface`] rendered into the window title.
struct TitleBar {
    base: String,
    speed: u8,
    motion: String,
    text_panel: String,
    dirty: bool,
}

impl TitleBar {
    fn new(base: String) -> Self {
        Self {
            base,
            speed: 0,
            motion: String::new(),
            text_panel: String::new(),
            dirty: true,
        }
    }

    fn title(&self) -> String {
        format!(
            "{} | Speed {}% | {} [Space] | {} [T]",
            self.base, self.speed, self.motion, self.text_panel
        )
    }

    /// Write the title if anything changed since the last call.
    fn apply(&mut self, window: &Window) {
        if self.dirty {
            window.set_title(&self.title());
            self.dirty = false;
        }
    }
}

impl UiSurface for TitleBar {
    fn set_speed_indicator(&mut self, _percentage: f32, aria_value: u8) {
        if self.speed != aria_value {
            self.speed = aria_value;
            self.dirty = true;
        }
    }

    fn set_motion_button(&mut self, label: &str, _pressed: bool) {
        label.clone_into(&mut self.motion);
        self.dirty = true;
    }

    fn set_text_panel(&mut self, label: &str, _expanded: bool) {
        label.clone_into(&mut self.text_panel);
        self.dirty = true;
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    session: Option<Session>,
    ui: TitleBar,
    options: Option<Options>,
    failure: Option<CityError>,
}

/// Surface size for a window, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    /// Create the render context and session for a fresh window.
    fn mount(&mut self, window: &Arc<Window>) -> Result<(), CityError> {
        let size = viewport_size(window.inner_size());
        let context = pollster::block_on(RenderContext::new(window.clone(), size))?;
        let mut renderer = SceneRenderer::new(context);

        let options = self.options.take().unwrap_or_default();
        let session = Session::start(options, size)?;
        renderer.load_scene(session.scene());
        session.sync_ui(&mut self.ui);
        self.ui.apply(window);

        self.renderer = Some(renderer);
        self.session = Some(session);
        Ok(())
    }

    fn forward(&mut self, event: &InputEvent) {
        let Some(session) = &mut self.session else {
            return;
        };
        let effect = session.handle_input(event, Instant::now(), &mut self.ui);
        if effect == Some(CommandEffect::TextPanelToggled { expanded: true }) {
            for (title, body) in session.text_alternative() {
                log::info!("{title}: {body}");
            }
        }
        if let Some(window) = &self.window {
            self.ui.apply(window);
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(session), Some(renderer)) =
            (&self.window, &mut self.session, &mut self.renderer)
        else {
            return;
        };
        match session.frame(Instant::now(), &mut self.ui, renderer) {
            Ok(true) => window.request_redraw(),
            Ok(false) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (width, height) = viewport_size(window.inner_size());
                renderer.resize(width, height);
                window.request_redraw();
            }
            Err(e) => {
                log::error!("render error: {e:?}");
                window.request_redraw();
            }
        }
        self.ui.apply(window);
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.ui.title())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                self.failure = Some(CityError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.mount(&window) {
            log::error!("Failed to mount city walk: {e}");
            self.failure = Some(e);
            event_loop.exit();
            return;
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(session) = &mut self.session {
                session.teardown();
            }
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(session) = &mut self.session {
                    session.resize(size.width, size.height);
                }
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseWheel { delta, .. } => {
                self.forward(&InputEvent::from(delta));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                self.forward(&InputEvent::Key(format!("{code:?}")));
            }

            _ => (),
        }
    }
}
