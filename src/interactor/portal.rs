//! Linked portal pairs

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::LightResult;
use crate::light::BeamLightRay;
use crate::scene::{InteractorId, Scene};

use super::{Interactor, Strike, outgoing};

/// Non-owning link to the sibling portal
///
/// `ratio` is sibling edge length over this portal's edge length, cached
/// when the pair is linked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PortalLink {
    pub(crate) sibling: Option<InteractorId>,
    pub(crate) ratio: f64,
}

impl PortalLink {
    pub fn sibling(&self) -> Option<InteractorId> {
        self.sibling
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

pub(super) fn ray_hit(
    portal: &Interactor,
    link: &PortalLink,
    scene: &Scene,
    strike: &Strike<'_>,
    min_length: f64,
) -> LightResult<Vec<BeamLightRay>> {
    let Some(sibling) = link.sibling.and_then(|id| scene.get(id)) else {
        return Ok(Vec::new());
    };
    let (Some(entry), Some(exit)) = (portal.world_bounds().next(), sibling.world_bounds().next()) else {
        return Ok(Vec::new());
    };

    let beam = strike.beam;
    let dir = beam.direction();

    // Distance along the entry edge maps onto the exit edge walked from its
    // end, scaled to the exit edge's length
    let exit_back = -exit.direction();
    let map = |point: DVec2| exit.end() + exit_back * ((point - entry.start()).dot(entry.direction()) * link.ratio);

    // Mirror about both edges so the light leaves the sibling instead of entering it
    let out = -exit.normal() * dir.dot(entry.normal()) - exit.direction() * dir.dot(entry.direction());

    outgoing(
        beam.colour(),
        out,
        (map(strike.left_point), beam.left().remaining()),
        (map(strike.right_point), beam.right().remaining()),
        min_length,
    )
}
