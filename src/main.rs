//! Lux Light demo runner
//!
//! Builds the test bench scene, sweeps a white source beam through a full
//! turn and logs the size of each propagated tree. Run with
//! `RUST_LOG=debug` to see per-propagation timings.

use glam::DVec2;
use lux_light::consts::DEFAULT_BEAM_LENGTH;
use lux_light::renderer::{beam_quads, edge_vertices, quad_vertices};
use lux_light::scene::demo_scene;
use lux_light::sim::{LogSection, propagate_logged};
use lux_light::{BeamLightRay, BeamTree, LightResult, LuxColour, PropagationSettings, rotate};

const SETTINGS_PATH: &str = "lux_settings.json";
const SCENE_SIZE: DVec2 = DVec2::new(1280.0, 720.0);
const BEAM_WIDTH: f64 = 30.0;
const STEPS: u32 = 72;
const BEAM_ALPHA: f32 = 0.35;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lux Light (native) starting...");

    if let Err(err) = run() {
        log::error!("Propagation failed: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on the web; the host page drives propagation
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> LightResult<()> {
    let settings = PropagationSettings::load_or_default(SETTINGS_PATH);
    let scene = demo_scene(SCENE_SIZE.x, SCENE_SIZE.y)?;
    log::info!(
        "Scene: {} interactors, {} edge vertices",
        scene.len(),
        edge_vertices(&scene, 2.0).len()
    );

    let centre = SCENE_SIZE / 2.0;
    let mut tree = BeamTree::new();
    let _total = LogSection::new(format!("{STEPS} rotation steps"));

    for step in 0..STEPS {
        let angle = std::f64::consts::TAU * f64::from(step) / f64::from(STEPS);
        let direction = rotate(DVec2::X, angle);
        let source = BeamLightRay::emit(LuxColour::WHITE, centre, direction, BEAM_WIDTH, DEFAULT_BEAM_LENGTH)?;
        let root = tree.insert(source);

        let children = propagate_logged(&scene, &mut tree, root, &settings)?;
        let quads = beam_quads(&tree, root)?;
        let vertices = quad_vertices(&quads, BEAM_ALPHA);
        log::info!(
            "Step {step:>2} ({:>5.1} deg): {} sub-beams, {} nodes, depth {}, {} vertices",
            angle.to_degrees(),
            children.len(),
            quads.len(),
            tree.depth(root),
            vertices.len()
        );

        tree.kill(root);
        tree.remove(root);
    }

    debug_assert!(tree.is_empty());
    Ok(())
}
