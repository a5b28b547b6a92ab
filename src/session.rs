//! A mounted city walk.
//!
//! [`Session`] owns everything that lives for as long as the view: the
//! static scene, the travel controller, the scroll energy, the input
//! processor, UI-only state, and the perspective camera. The host drives it
//! by forwarding input events and calling [`Session::tick`] (or
//! [`Session::frame`]) once per display refresh. Teardown cancels the
//! session's [`FrameHandle`]; after that the session ignores input and
//! produces no frames, so a host that still holds a scheduled callback
//! simply stops.

use std::cell::Cell;
use std::rc::Rc;

use rand::Rng;
use web_time::Instant;

use crate::camera::{Camera, CameraMotionController, CommandEffect, ScrollEnergy};
use crate::error::CityError;
use crate::input::{CityCommand, InputEvent, InputProcessor};
use crate::options::Options;
use crate::renderer::RenderBackend;
use crate::scene::{
    default_contents, BillboardContent, BillboardFactory, ProceduralCityBuilder, Scene,
};
use crate::texture::{BillboardFace, GlyphFace, TextureComposer};
use crate::ui::{self, UiState, UiSurface};

/// Cancellation flag for the per-frame loop. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct FrameHandle {
    cancelled: Rc<Cell<bool>>,
}

impl FrameHandle {
    /// Stop the frame loop. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether the loop was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Explicit context for one mounted view.
#[derive(Debug)]
pub struct Session {
    options: Options,
    scene: Scene,
    controller: CameraMotionController,
    energy: ScrollEnergy,
    input: InputProcessor,
    ui_state: UiState,
    camera: Camera,
    frame: FrameHandle,
}

impl Session {
    /// Mount a session on a `width` × `height` surface.
    ///
    /// Generates the city with `rng`, composes every billboard in
    /// `contents` with `face`, and adds the environment. The controller
    /// starts paused when `options.accessibility.reduced_motion` is set.
    ///
    /// `options` are validated first (see [`Options::validate`]).
    ///
    /// # Errors
    ///
    /// Returns [`CityError::Mount`] if the surface has no area, or
    /// [`CityError::OptionsParse`] if an option is unusable.
    pub fn new<F, R>(
        mut options: Options,
        contents: &[BillboardContent],
        size: (u32, u32),
        face: F,
        rng: &mut R,
    ) -> Result<Self, CityError>
    where
        F: GlyphFace,
        R: Rng + ?Sized,
    {
        let (width, height) = size;
        if width == 0 || height == 0 {
            return Err(CityError::Mount(format!(
                "mount surface has no area ({width}x{height})"
            )));
        }

        options.validate()?;

        let composer = TextureComposer::new(face, options.billboard.clone());
        let scene = build_scene(&options, contents, &composer, rng);

        let controller = CameraMotionController::from_options(&options);
        let energy = ScrollEnergy::from_options(&options.motion);
        let input = InputProcessor::with_key_bindings(options.keybindings.clone());
        let mut camera = Camera::new(&options.camera, width, height);
        controller.update_camera(&mut camera, &options.camera);

        log::info!(
            "session mounted at {width}x{height} ({}, {} billboards)",
            if controller.is_paused() {
                "paused for reduced motion"
            } else {
                "running"
            },
            scene.billboards.len()
        );

        Ok(Self {
            options,
            scene,
            controller,
            energy,
            input,
            ui_state: UiState::default(),
            camera,
            frame: FrameHandle::default(),
        })
    }

    /// Mount with the default billboards, the configured or system font,
    /// and a non-deterministic city.
    ///
    /// # Errors
    ///
    /// Returns [`CityError::Mount`] for an empty surface, or
    /// [`CityError::Font`] / [`CityError::Io`] when a configured font
    /// cannot be loaded.
    pub fn start(options: Options, size: (u32, u32)) -> Result<Self, CityError> {
        let face = BillboardFace::from_options(&options.billboard)?;
        Self::new(options, &default_contents(), size, face, &mut rand::rng())
    }

    /// Push the full UI state to a host's controls.
    pub fn sync_ui(&self, ui: &mut dyn UiSurface) {
        ui::sync_all(ui, &self.controller, &self.energy, self.ui_state);
    }

    /// Translate and execute an input event. Returns `None` when the event
    /// maps to no command or the session was torn down.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        now: Instant,
        ui: &mut dyn UiSurface,
    ) -> Option<CommandEffect> {
        if self.frame.is_cancelled() {
            return None;
        }
        self.poll_energy(now, ui);
        let command = self.input.handle_event(event)?;
        Some(self.execute(command, now, ui))
    }

    /// Execute a command and push its side effects to the UI. A torn-down
    /// session ignores every command.
    pub fn execute(
        &mut self,
        command: CityCommand,
        now: Instant,
        ui: &mut dyn UiSurface,
    ) -> CommandEffect {
        if self.frame.is_cancelled() {
            return CommandEffect::Ignored;
        }
        if command == CityCommand::ToggleTextPanel {
            let expanded = self.ui_state.toggle_text_panel();
            ui::sync_text_panel(ui, expanded);
            log::info!("text alternative {}", if expanded { "shown" } else { "hidden" });
            return CommandEffect::TextPanelToggled { expanded };
        }

        let effect = self.controller.apply(command);
        match effect {
            CommandEffect::Scrolled { speed } => {
                self.energy.excite(speed, now);
                ui::sync_speed(ui, &self.energy);
            }
            CommandEffect::PauseToggled { paused } => {
                log::info!("motion {}", if paused { "paused" } else { "resumed" });
                ui::sync_motion(ui, paused);
            }
            CommandEffect::Reset => {
                log::info!("camera reset");
                self.energy.clear();
                ui::sync_speed(ui, &self.energy);
            }
            CommandEffect::Ignored => {
                log::debug!("{command:?} ignored while paused");
            }
            CommandEffect::Moved | CommandEffect::TextPanelToggled { .. } => {}
        }
        effect
    }

    /// Advance one frame and return the camera to render with, or `None`
    /// once the session is torn down.
    pub fn tick(&mut self, now: Instant, ui: &mut dyn UiSurface) -> Option<&Camera> {
        if self.frame.is_cancelled() {
            return None;
        }
        self.poll_energy(now, ui);
        self.controller.tick();
        self.controller
            .update_camera(&mut self.camera, &self.options.camera);
        Some(&self.camera)
    }

    /// Tick, then hand the camera to `backend` and render. Returns
    /// `Ok(false)` without rendering once the session is torn down.
    ///
    /// # Errors
    ///
    /// Propagates the backend's render error.
    pub fn frame<B: RenderBackend>(
        &mut self,
        now: Instant,
        ui: &mut dyn UiSurface,
        backend: &mut B,
    ) -> Result<bool, B::Error> {
        let Some(camera) = self.tick(now, ui) else {
            return Ok(false);
        };
        backend.set_camera(camera);
        backend.render()?;
        Ok(true)
    }

    /// Update the projection aspect. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Cancel the frame loop and drop transient state.
    pub fn teardown(&mut self) {
        if self.frame.is_cancelled() {
            return;
        }
        self.frame.cancel();
        self.energy.clear();
        log::info!("session torn down");
    }

    /// Handle to the session's frame loop.
    #[must_use]
    pub fn frame_handle(&self) -> FrameHandle {
        self.frame.clone()
    }

    /// Whether the session was torn down.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.frame.is_cancelled()
    }

    /// The static scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The travel controller.
    #[must_use]
    pub fn controller(&self) -> &CameraMotionController {
        &self.controller
    }

    /// The scroll energy feeding the speed indicator.
    #[must_use]
    pub fn energy(&self) -> &ScrollEnergy {
        &self.energy
    }

    /// The perspective camera as of the last tick.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// UI-only state.
    #[must_use]
    pub fn ui_state(&self) -> UiState {
        self.ui_state
    }

    /// Options the session was mounted with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Billboard titles and bodies in travel order, for the text
    /// alternative panel.
    pub fn text_alternative(&self) -> impl Iterator<Item = (&str, &str)> {
        self.scene
            .billboards
            .iter()
            .map(|b| (b.content.title.as_str(), b.content.body.as_str()))
    }

    fn poll_energy(&mut self, now: Instant, ui: &mut dyn UiSurface) {
        if self.energy.poll(now) {
            ui::sync_speed(ui, &self.energy);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.frame.cancel();
    }
}

/// Populate a scene: environment, city, then billboards.
fn build_scene<F, R>(
    options: &Options,
    contents: &[BillboardContent],
    composer: &TextureComposer<F>,
    rng: &mut R,
) -> Scene
where
    F: GlyphFace,
    R: Rng + ?Sized,
{
    let mut scene = Scene::new(&options.atmosphere);
    scene.add_environment(options.city.length, &options.atmosphere);

    let city = ProceduralCityBuilder::from_options(&options.city).build(rng);
    scene.add_city(&city);

    let factory = BillboardFactory::new(composer);
    for content in contents {
        let _ = scene.add_billboard(factory.build(content));
    }

    log::debug!(
        "scene: {} nodes, {} lights, {} textures",
        scene.nodes.len(),
        scene.lights.len(),
        scene.textures.len()
    );
    scene
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use web_time::Duration;

    use super::*;
    use crate::input::UiButton;
    use crate::texture::BlockFace;

    #[derive(Default)]
    struct Recording {
        speed: Vec<u8>,
        motion: Vec<String>,
        panel: Vec<bool>,
    }

    impl UiSurface for Recording {
        fn set_speed_indicator(&mut self, _percentage: f32, aria_value: u8) {
            self.speed.push(aria_value);
        }

        fn set_motion_button(&mut self, label: &str, _pressed: bool) {
            self.motion.push(label.to_owned());
        }

        fn set_text_panel(&mut self, _label: &str, expanded: bool) {
            self.panel.push(expanded);
        }
    }

    #[derive(Default)]
    struct CountingBackend {
        eyes: Vec<f32>,
        renders: usize,
    }

    impl RenderBackend for CountingBackend {
        type Error = std::convert::Infallible;

        fn load_scene(&mut self, _scene: &Scene) {}

        fn set_camera(&mut self, camera: &Camera) {
            self.eyes.push(camera.eye.z);
        }

        fn resize(&mut self, _width: u32, _height: u32) {}

        fn render(&mut self) -> Result<(), Self::Error> {
            self.renders += 1;
            Ok(())
        }
    }

    fn session(options: Options) -> Session {
        let mut rng = StdRng::seed_from_u64(9);
        Session::new(
            options,
            &default_contents(),
            (800, 600),
            BlockFace::default(),
            &mut rng,
        )
        .unwrap()
    }

    fn key(name: &str) -> InputEvent {
        InputEvent::Key(name.to_owned())
    }

    #[test]
    fn zero_sized_mount_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = Session::new(
            Options::default(),
            &default_contents(),
            (0, 600),
            BlockFace::default(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, CityError::Mount(_)));
    }

    #[test]
    fn unusable_options_are_clamped_before_mounting() {
        let mut options = Options::default();
        options.motion.damping = 2.5;
        options.motion.key_step = -20.0;
        let mut s = session(options);
        assert_eq!(s.options().motion.damping, 1.0);
        assert_eq!(s.options().motion.key_step, 0.0);

        let mut ui = Recording::default();
        let now = Instant::now();
        let _ = s.execute(CityCommand::JumpToEnd, now, &mut ui);
        let _ = s.execute(CityCommand::TogglePause, now, &mut ui);
        let gap = (s.controller().target() - s.controller().current()).abs();
        let _ = s.tick(now, &mut ui);
        assert!((s.controller().target() - s.controller().current()).abs() < gap);

        let mut options = Options::default();
        options.city.length = f32::NAN;
        let mut rng = StdRng::seed_from_u64(1);
        let err = Session::new(
            options,
            &default_contents(),
            (800, 600),
            BlockFace::default(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, CityError::OptionsParse(_)));
    }

    #[test]
    fn scene_holds_city_billboards_and_environment() {
        let s = session(Options::default());
        assert_eq!(s.scene().billboards.len(), 8);
        assert_eq!(s.scene().textures.len(), 8);
        // 2 global, 20 street, 2 per billboard
        assert_eq!(s.scene().light_count(), 2 + 20 + 16);
        assert_eq!(s.text_alternative().count(), 8);
        assert_eq!(s.camera().eye.z, 0.0);
    }

    #[test]
    fn reduced_motion_boots_paused_and_ignores_travel() {
        let mut options = Options::default();
        options.accessibility.reduced_motion = true;
        let mut s = session(options);
        let mut ui = Recording::default();
        s.sync_ui(&mut ui);
        assert_eq!(ui.motion, vec![ui::RESUME_LABEL.to_owned()]);

        let now = Instant::now();
        let effect = s.handle_input(&key("End"), now, &mut ui);
        assert_eq!(effect, Some(CommandEffect::Ignored));
        assert_eq!(s.controller().target(), 0.0);

        let effect = s.handle_input(&InputEvent::Button(UiButton::ToggleMotion), now, &mut ui);
        assert_eq!(effect, Some(CommandEffect::PauseToggled { paused: false }));
        assert_eq!(ui.motion.last().map(String::as_str), Some(ui::PAUSE_LABEL));
    }

    #[test]
    fn wheel_excites_then_decays_the_indicator() {
        let mut s = session(Options::default());
        let mut ui = Recording::default();
        let t0 = Instant::now();
        let _ = s.handle_input(&InputEvent::Wheel { delta_y: 125.0 }, t0, &mut ui);
        assert_eq!(ui.speed, vec![50]);

        let _ = s.tick(t0 + Duration::from_millis(100), &mut ui);
        assert_eq!(ui.speed, vec![50]);
        let _ = s.tick(t0 + Duration::from_millis(160), &mut ui);
        assert_eq!(ui.speed, vec![50, 0]);
        assert_eq!(s.energy().speed(), 0.0);
    }

    #[test]
    fn escape_resets_and_clears_energy() {
        let mut s = session(Options::default());
        let mut ui = Recording::default();
        let now = Instant::now();
        let _ = s.handle_input(&InputEvent::Wheel { delta_y: 400.0 }, now, &mut ui);
        let _ = s.handle_input(&key("End"), now, &mut ui);
        for _ in 0..20 {
            let _ = s.tick(now, &mut ui);
        }
        assert_eq!(
            s.handle_input(&key("Escape"), now, &mut ui),
            Some(CommandEffect::Reset)
        );
        assert_eq!(s.controller().current(), 0.0);
        assert_eq!(s.energy().speed(), 0.0);
        assert_eq!(ui.speed.last(), Some(&0));
    }

    #[test]
    fn text_panel_toggles_from_key_and_button() {
        let mut s = session(Options::default());
        let mut ui = Recording::default();
        let now = Instant::now();
        let _ = s.handle_input(&key("KeyT"), now, &mut ui);
        let _ = s.handle_input(&InputEvent::Button(UiButton::ToggleTextPanel), now, &mut ui);
        assert_eq!(ui.panel, vec![true, false]);
        assert!(!s.ui_state().text_panel_expanded);
    }

    #[test]
    fn frames_feed_the_backend_until_teardown() {
        let mut s = session(Options::default());
        let mut backend = CountingBackend::default();
        let mut ui = Recording::default();
        let now = Instant::now();
        let handle = s.frame_handle();

        assert_eq!(s.frame(now, &mut ui, &mut backend), Ok(true));
        assert_eq!(s.frame(now, &mut ui, &mut backend), Ok(true));
        assert_eq!(backend.renders, 2);
        assert!(backend.eyes[1] < 0.0);

        s.teardown();
        assert!(handle.is_cancelled());
        assert_eq!(s.frame(now, &mut ui, &mut backend), Ok(false));
        assert!(s.tick(now, &mut ui).is_none());
        assert!(s.handle_input(&key("End"), now, &mut ui).is_none());
        let target = s.controller().target();
        let pushes = (ui.speed.len(), ui.motion.len(), ui.panel.len());
        for command in [
            CityCommand::JumpToEnd,
            CityCommand::TogglePause,
            CityCommand::ToggleTextPanel,
            CityCommand::Scroll { delta: 500.0 },
        ] {
            assert_eq!(s.execute(command, now, &mut ui), CommandEffect::Ignored);
        }
        assert_eq!(s.controller().target(), target);
        assert!(!s.controller().is_paused());
        assert_eq!((ui.speed.len(), ui.motion.len(), ui.panel.len()), pushes);
        assert_eq!(backend.renders, 2);
    }

    #[test]
    fn resize_ignores_zero_sizes() {
        let mut s = session(Options::default());
        s.resize(1600, 800);
        assert_eq!(s.camera().aspect, 2.0);
        s.resize(0, 800);
        assert_eq!(s.camera().aspect, 2.0);
    }
}
