//! End-to-end checks of a mounted city walk: scene population, travel
//! commands through the session, and baking the scene for the GPU.

use citywalk::camera::{Camera, CommandEffect};
use citywalk::input::{InputEvent, UiButton};
use citywalk::options::Options;
use citywalk::renderer::lights::{pack_scene, MAX_LIGHTS};
use citywalk::renderer::mesh::bake_scene;
use citywalk::renderer::RenderBackend;
use citywalk::scene::{default_contents, Scene};
use citywalk::texture::BlockFace;
use citywalk::ui::{NoUi, UiSurface};
use citywalk::Session;
use rand::rngs::StdRng;
use rand::SeedableRng;
use web_time::Instant;

fn mount(options: Options, seed: u64) -> Session {
    let mut rng = StdRng::seed_from_u64(seed);
    Session::new(
        options,
        &default_contents(),
        (1280, 720),
        BlockFace::default(),
        &mut rng,
    )
    .unwrap()
}

fn key(name: &str) -> InputEvent {
    InputEvent::Key(name.to_owned())
}

#[derive(Default)]
struct Chrome {
    labels: Vec<String>,
}

impl UiSurface for Chrome {
    fn set_motion_button(&mut self, label: &str, _pressed: bool) {
        self.labels.push(label.to_owned());
    }
}

#[derive(Default)]
struct Recorder {
    loaded_nodes: usize,
    eye_z: Vec<f32>,
}

impl RenderBackend for Recorder {
    type Error = String;

    fn load_scene(&mut self, scene: &Scene) {
        self.loaded_nodes = scene.nodes.len();
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.eye_z.push(camera.eye.z);
    }

    fn resize(&mut self, _width: u32, _height: u32) {}

    fn render(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn billboards_are_distinct_and_face_the_street() {
    let session = mount(Options::default(), 3);
    let billboards = &session.scene().billboards;
    assert_eq!(billboards.len(), 8);

    let mut ids: Vec<&str> = billboards.iter().map(|b| b.content.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);

    let mut textures: Vec<usize> = billboards.iter().map(|b| b.texture.0).collect();
    textures.sort_unstable();
    textures.dedup();
    assert_eq!(textures.len(), 8);

    for b in billboards {
        assert_eq!(b.yaw > 0.0, b.content.position.x < 0.0, "{}", b.content.id);
    }
}

#[test]
fn home_and_end_bound_the_travel_target() {
    let mut session = mount(Options::default(), 4);
    let mut ui = NoUi;
    let now = Instant::now();

    assert_eq!(
        session.handle_input(&key("End"), now, &mut ui),
        Some(CommandEffect::Moved)
    );
    let end = session.controller().target();
    assert_eq!(end, session.controller().bounds().min);
    assert!(end < 0.0);

    let _ = session.handle_input(&key("ArrowDown"), now, &mut ui);
    assert_eq!(session.controller().target(), end);

    let _ = session.handle_input(&key("Home"), now, &mut ui);
    assert_eq!(session.controller().target(), 0.0);
    let _ = session.handle_input(&key("ArrowUp"), now, &mut ui);
    assert_eq!(session.controller().target(), 0.0);
}

#[test]
fn camera_travels_forward_then_resets() {
    let mut session = mount(Options::default(), 5);
    let mut backend = Recorder::default();
    backend.load_scene(session.scene());
    assert_eq!(backend.loaded_nodes, session.scene().nodes.len());

    let mut ui = NoUi;
    let now = Instant::now();
    let _ = session.handle_input(&key("End"), now, &mut ui);
    for _ in 0..60 {
        assert_eq!(session.frame(now, &mut ui, &mut backend), Ok(true));
    }
    assert!(backend.eye_z.windows(2).all(|w| w[1] <= w[0]));
    assert!(session.camera().eye.z < -100.0);

    let _ = session.handle_input(&InputEvent::Button(UiButton::ResetCamera), now, &mut ui);
    assert_eq!(session.frame(now, &mut ui, &mut backend), Ok(true));
    assert!(backend.eye_z.last().is_some_and(|z| z.abs() < 1.0));
}

#[test]
fn reduced_motion_session_starts_paused_with_resume_label() {
    let mut options = Options::default();
    options.accessibility.reduced_motion = true;
    let mut session = mount(options, 6);
    let mut chrome = Chrome::default();
    session.sync_ui(&mut chrome);
    assert_eq!(chrome.labels, vec!["Resume Animation".to_owned()]);

    let now = Instant::now();
    let z0 = session.tick(now, &mut chrome).map(|c| c.eye.z);
    let z1 = session.tick(now, &mut chrome).map(|c| c.eye.z);
    assert_eq!(z0, z1);
}

#[test]
fn whole_scene_bakes_into_finite_batches() {
    let session = mount(Options::default(), 7);
    let scene = session.scene();
    let batches = bake_scene(scene);

    assert_eq!(batches.textured.len(), 8);
    assert!(!batches.opaque.is_empty());
    assert!(!batches.transparent.is_empty());
    let all = std::iter::once(&batches.opaque)
        .chain(std::iter::once(&batches.transparent))
        .chain(batches.textured.iter().map(|(_, m)| m));
    for mesh in all {
        assert!(mesh
            .vertices
            .iter()
            .all(|v| v.position.iter().chain(&v.normal).all(|c| c.is_finite())));
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len()));
    }

    let lighting = pack_scene(scene);
    let packed = lighting.environment.ambient_count[3] as usize;
    assert!(packed <= MAX_LIGHTS);
    assert_eq!(packed, scene.light_count() - 1);
}
