//! Interactor storage and portal pairing
//!
//! The scene owns every interactor; everything else refers to them through
//! [`InteractorId`] handles. Portal siblings are such handles too, so pairing
//! never creates ownership between portals.

pub mod random;

use glam::DVec2;
use slotmap::{SlotMap, new_key_type};

use crate::colour::LuxColour;
use crate::consts::EPSILON;
use crate::error::{LightError, LightResult};
use crate::interactor::{Interactor, InteractorKind, PortalLink, RayInteractorEdge};

new_key_type! {
    /// Stable handle to an interactor in a [`Scene`]
    pub struct InteractorId;
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    interactors: SlotMap<InteractorId, Interactor>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, interactor: Interactor) -> InteractorId {
        self.interactors.insert(interactor)
    }

    /// Remove an interactor, unlinking its portal sibling first
    pub fn remove(&mut self, id: InteractorId) -> Option<Interactor> {
        self.unlink_portal(id);
        self.interactors.remove(id)
    }

    pub fn get(&self, id: InteractorId) -> Option<&Interactor> {
        self.interactors.get(id)
    }

    /// Mutable access for moving or recolouring an interactor between propagations
    pub fn get_mut(&mut self, id: InteractorId) -> Option<&mut Interactor> {
        self.interactors.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (InteractorId, &Interactor)> {
        self.interactors.iter()
    }

    pub fn len(&self) -> usize {
        self.interactors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactors.is_empty()
    }

    /// Insert two portals and link them to each other
    pub fn insert_portal_pair(
        &mut self,
        height: f64,
        colour: LuxColour,
        (origin_a, facing_a): (DVec2, DVec2),
        (origin_b, facing_b): (DVec2, DVec2),
    ) -> LightResult<(InteractorId, InteractorId)> {
        let a = self.insert(Interactor::portal(height, origin_a, facing_a, colour));
        let b = self.insert(Interactor::portal(height, origin_b, facing_b, colour));
        self.link_portals(a, b)?;
        Ok((a, b))
    }

    /// Pair two portals, replacing any previous partners of either
    ///
    /// Caches the ratio between the two portal edges on both sides.
    pub fn link_portals(&mut self, a: InteractorId, b: InteractorId) -> LightResult<()> {
        if a == b {
            return Err(LightError::SelfLinkedPortal(a));
        }
        let len_a = self.portal_edge(a)?.length();
        let len_b = self.portal_edge(b)?.length();

        self.unlink_portal(a);
        self.unlink_portal(b);

        self.set_link(a, Some(b), edge_ratio(len_b, len_a));
        self.set_link(b, Some(a), edge_ratio(len_a, len_b));
        log::debug!("Linked portals {:?} <-> {:?}", a, b);
        Ok(())
    }

    /// Break the pairing of a portal on both sides. No-op for anything else.
    pub fn unlink_portal(&mut self, id: InteractorId) {
        let sibling = match self.interactors.get(id).map(Interactor::kind) {
            Some(InteractorKind::Portal(link)) => link.sibling,
            _ => return,
        };
        self.set_link(id, None, 0.0);
        if let Some(sibling) = sibling {
            let points_back = matches!(
                self.interactors.get(sibling).map(Interactor::kind),
                Some(InteractorKind::Portal(link)) if link.sibling == Some(id)
            );
            if points_back {
                self.set_link(sibling, None, 0.0);
            }
        }
    }

    fn portal_edge(&self, id: InteractorId) -> LightResult<RayInteractorEdge> {
        let interactor = self.interactors.get(id).ok_or(LightError::UnknownInteractor(id))?;
        if !matches!(interactor.kind(), InteractorKind::Portal(_)) {
            return Err(LightError::NotAPortal(id));
        }
        interactor.bounds().first().copied().ok_or(LightError::NotAPortal(id))
    }

    fn set_link(&mut self, id: InteractorId, sibling: Option<InteractorId>, ratio: f64) {
        if let Some(interactor) = self.interactors.get_mut(id) {
            if let InteractorKind::Portal(link) = interactor.kind_mut() {
                *link = PortalLink { sibling, ratio };
            }
        }
    }
}

fn edge_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator < EPSILON { 0.0 } else { numerator / denominator }
}

/// Compass directions used to lay out scenes
pub mod directions {
    use glam::DVec2;
    use std::f64::consts::FRAC_1_SQRT_2;

    pub const NORTH: DVec2 = DVec2::new(0.0, 1.0);
    pub const SOUTH: DVec2 = DVec2::new(0.0, -1.0);
    pub const EAST: DVec2 = DVec2::new(1.0, 0.0);
    pub const WEST: DVec2 = DVec2::new(-1.0, 0.0);
    pub const NORTHEAST: DVec2 = DVec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
    pub const NORTHWEST: DVec2 = DVec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2);
    pub const SOUTHEAST: DVec2 = DVec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2);
    pub const SOUTHWEST: DVec2 = DVec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2);
}

/// Test bench: a mirrored box around coloured mirrors, filters and a portal pair
///
/// `width` and `height` are the box size; the bench is centred in it.
pub fn demo_scene(width: f64, height: f64) -> LightResult<Scene> {
    use directions::*;

    let centre = DVec2::new(width / 2.0, height / 2.0);
    let at = |dx: f64, dy: f64| centre + DVec2::new(dx, dy);
    let slit = |half: f64, bi_dir: bool| vec![RayInteractorEdge::new(DVec2::new(0.0, -half), DVec2::new(0.0, half), bi_dir)];

    let mut scene = Scene::new();
    scene.insert(Interactor::mirror(width, DVec2::new(width / 2.0, height), SOUTH, LuxColour::WHITE));
    scene.insert(Interactor::mirror(height, DVec2::new(0.0, height / 2.0), EAST, LuxColour::WHITE));
    scene.insert(Interactor::mirror(height, DVec2::new(width, height / 2.0), WEST, LuxColour::WHITE));
    scene.insert(Interactor::mirror(width, DVec2::new(width / 2.0, 0.0), NORTH, LuxColour::WHITE));

    scene.insert(Interactor::filter(at(125.0, 75.0), NORTHWEST, LuxColour::RED, slit(50.0, true)));
    scene.insert(Interactor::mirror(400.0, at(400.0, 25.0), SOUTHWEST, LuxColour::GREEN));
    scene.insert(Interactor::mirror(100.0, at(200.0, -75.0), WEST, LuxColour::BLUE));
    scene.insert(Interactor::filter(at(100.0, -35.0), NORTHWEST, LuxColour::CYAN, slit(25.0, false)));
    scene.insert(Interactor::filter(at(150.0, -125.0), EAST, LuxColour::CYAN, slit(50.0, false)));

    scene.insert_portal_pair(100.0, LuxColour::WHITE, (at(250.0, 0.0), WEST), (at(-100.0, -50.0), EAST))?;
    Ok(scene)
}
