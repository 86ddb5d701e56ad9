//! Recursive beam propagation
//!
//! `propagate` tears down a beam's subtree and rebuilds it from scratch:
//! sweep the beam, attach each sub-beam, and recurse into whatever the struck
//! interactors emit.

use super::sweep::sweep;
use crate::error::LightResult;
use crate::light::{BeamId, BeamLightRay, BeamTree};
use crate::scene::Scene;
use crate::settings::PropagationSettings;

/// Rebuild the subtree below `beam` with default settings
pub fn propagate(scene: &Scene, tree: &mut BeamTree, beam: BeamId) -> LightResult<Vec<BeamId>> {
    propagate_with(scene, tree, beam, &PropagationSettings::default())
}

/// Rebuild the subtree below `beam`
///
/// Returns the sub-beams attached directly under `beam`, ordered right to
/// left. On failure `beam` is left live with no children.
pub fn propagate_with(
    scene: &Scene,
    tree: &mut BeamTree,
    beam: BeamId,
    settings: &PropagationSettings,
) -> LightResult<Vec<BeamId>> {
    tree.kill_children(beam);
    let source = tree.get(beam)?.clone();

    match expand(scene, tree, beam, &source, settings, 0) {
        Ok(children) => {
            log::debug!(
                "Propagated {source}: {} direct sub-beams, {} nodes below",
                children.len(),
                tree.descendants(beam).map_or(0, |d| d.len())
            );
            Ok(children)
        }
        Err(err) => {
            log::debug!("Propagation of {source} failed: {err}");
            tree.kill_children(beam);
            Err(err)
        }
    }
}

/// Sweep `source` and hang the resulting sub-beams under `parent`
///
/// `depth` counts the interactions between the root and `source`.
fn expand(
    scene: &Scene,
    tree: &mut BeamTree,
    parent: BeamId,
    source: &BeamLightRay,
    settings: &PropagationSettings,
    depth: u32,
) -> LightResult<Vec<BeamId>> {
    let sweep = sweep(scene, source)?;
    let mut attached = Vec::with_capacity(sweep.hits.len());

    for hit in &sweep.hits {
        let child = tree.attach(parent, hit.beam.clone())?;
        attached.push(child);

        let Some(interactor) = sweep.edges.owner(&hit.edge).and_then(|id| scene.get(id)) else {
            continue;
        };
        if depth + 1 >= settings.max_depth {
            log::warn!("Depth cap {} reached at {}", settings.max_depth, hit.beam);
            continue;
        }
        for outgoing in interactor.ray_hit(scene, &hit.strike(), settings.min_length)? {
            expand(scene, tree, child, &outgoing, settings, depth + 1)?;
        }
    }
    Ok(attached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::LuxColour;
    use crate::error::LightError;
    use crate::interactor::{Interactor, RayInteractorEdge};
    use crate::scene::demo_scene;
    use crate::scene::directions::*;
    use glam::DVec2;

    const TOLERANCE: f64 = 1e-9;

    fn root(tree: &mut BeamTree, origin: DVec2, direction: DVec2, width: f64, length: f64) -> BeamId {
        tree.insert(BeamLightRay::emit(LuxColour::WHITE, origin, direction, width, length).unwrap())
    }

    #[test]
    fn test_empty_scene() {
        let mut tree = BeamTree::new();
        let beam = root(&mut tree, DVec2::ZERO, EAST, 10.0, 250.0);
        let children = propagate(&Scene::new(), &mut tree, beam).unwrap();

        assert_eq!(children.len(), 1);
        let piece = tree.get(children[0]).unwrap();
        let original = tree.get(beam).unwrap();
        assert!((piece.left().end() - original.left().end()).length() < TOLERANCE);
        assert!((piece.right().end() - original.right().end()).length() < TOLERANCE);
        assert!(tree.children(children[0]).unwrap().is_empty());
    }

    #[test]
    fn test_mirror_at_45_degrees() {
        let mut scene = Scene::new();
        scene.insert(Interactor::mirror(20.0, DVec2::ZERO, NORTHWEST, LuxColour::WHITE));
        let mut tree = BeamTree::new();
        let beam = root(&mut tree, DVec2::new(-10.0, 0.0), EAST, 2.0, 100.0);

        let children = propagate(&scene, &mut tree, beam).unwrap();
        assert_eq!(children.len(), 1);
        let reflected = tree.children(children[0]).unwrap();
        assert_eq!(reflected.len(), 1);

        let out = tree.get(reflected[0]).unwrap();
        assert!((out.direction() - NORTH).length() < TOLERANCE);
        // Nothing above the mirror: the reflected piece runs to its own end
        assert!(tree.children(reflected[0]).unwrap().is_empty());
        // Reflection swaps sides; each keeps the budget of the ray it came from
        assert!((out.left().length - 91.0).abs() < 1e-6);
        assert!((out.right().length - 89.0).abs() < 1e-6);
    }

    #[test]
    fn test_linked_portals() {
        let mut scene = Scene::new();
        scene
            .insert_portal_pair(100.0, LuxColour::WHITE, (DVec2::ZERO, EAST), (DVec2::new(100.0, 100.0), WEST))
            .unwrap();
        let mut tree = BeamTree::new();
        let beam = root(&mut tree, DVec2::new(50.0, 0.0), WEST, 10.0, 500.0);

        let children = propagate(&scene, &mut tree, beam).unwrap();
        assert_eq!(children.len(), 1);
        let entry = tree.get(children[0]).unwrap();
        assert!((entry.left().end().x).abs() < TOLERANCE);

        let through = tree.children(children[0]).unwrap();
        assert_eq!(through.len(), 1);
        let exit = tree.get(through[0]).unwrap();
        let midpoint = (exit.left().source + exit.right().source) / 2.0;
        assert!((midpoint - DVec2::new(100.0, 100.0)).length() < TOLERANCE);
        assert!((exit.direction() - WEST).length() < TOLERANCE);
        // Travelled 50 before the portal, 450 left after it
        assert!((exit.left().length - 450.0).abs() < 1e-6);
        assert!((exit.right().length - 450.0).abs() < 1e-6);
    }

    #[test]
    fn test_filter_absorbs() {
        let mut scene = Scene::new();
        let slit = vec![RayInteractorEdge::new(DVec2::new(0.0, -20.0), DVec2::new(0.0, 20.0), true)];
        scene.insert(Interactor::filter(DVec2::new(30.0, 0.0), EAST, LuxColour::RED, slit));
        let mut tree = BeamTree::new();
        let beam = tree.insert(
            BeamLightRay::emit(LuxColour::CYAN, DVec2::ZERO, EAST, 10.0, 100.0).unwrap(),
        );

        let children = propagate(&scene, &mut tree, beam).unwrap();
        assert_eq!(children.len(), 1);
        assert!(tree.children(children[0]).unwrap().is_empty());
    }

    #[test]
    fn test_filter_passes_shared_channel() {
        let mut scene = Scene::new();
        let slit = vec![RayInteractorEdge::new(DVec2::new(0.0, -20.0), DVec2::new(0.0, 20.0), true)];
        scene.insert(Interactor::filter(DVec2::new(30.0, 0.0), EAST, LuxColour::YELLOW, slit));
        let mut tree = BeamTree::new();
        let beam = root(&mut tree, DVec2::ZERO, EAST, 10.0, 100.0);
        let children = propagate(&scene, &mut tree, beam).unwrap();

        let passed = tree.children(children[0]).unwrap();
        assert_eq!(passed.len(), 1);
        let piece = tree.get(passed[0]).unwrap();
        assert_eq!(piece.colour(), LuxColour::YELLOW);
        assert!((piece.direction() - EAST).length() < TOLERANCE);
        assert!((piece.right().end().x - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_repropagate_replaces_subtree() {
        let scene = demo_scene(1280.0, 720.0).unwrap();
        let mut tree = BeamTree::new();
        let beam = root(&mut tree, DVec2::new(640.0, 360.0), NORTHEAST, 30.0, 3500.0);

        propagate(&scene, &mut tree, beam).unwrap();
        let first = tree.len();
        propagate(&scene, &mut tree, beam).unwrap();
        assert_eq!(tree.len(), first);
        assert!(tree.depth(beam) >= 2);
    }

    #[test]
    fn test_depth_cap() {
        // Two facing mirrors bounce the beam back and forth
        let mut scene = Scene::new();
        scene.insert(Interactor::mirror(100.0, DVec2::new(50.0, 0.0), WEST, LuxColour::WHITE));
        scene.insert(Interactor::mirror(100.0, DVec2::new(-50.0, 0.0), EAST, LuxColour::WHITE));
        let mut tree = BeamTree::new();
        let beam = root(&mut tree, DVec2::ZERO, EAST, 10.0, 1.0e6);
        let settings = PropagationSettings {
            max_depth: 4,
            ..PropagationSettings::default()
        };

        propagate_with(&scene, &mut tree, beam, &settings).unwrap();
        assert_eq!(tree.depth(beam), 4);
    }

    #[test]
    fn test_killed_beam_is_rejected() {
        let mut tree = BeamTree::new();
        let beam = root(&mut tree, DVec2::ZERO, EAST, 10.0, 100.0);
        tree.kill(beam);
        assert!(matches!(
            propagate(&Scene::new(), &mut tree, beam),
            Err(LightError::DeadBeam(_))
        ));
    }
}
