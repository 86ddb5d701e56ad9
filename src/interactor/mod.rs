//! Scene objects that beams can strike
//!
//! An [`Interactor`] is a position, heading and colour plus a set of local
//! boundary edges. What happens when a beam strikes one of those edges is
//! decided by its [`InteractorKind`].

pub mod edge;
mod filter;
mod mirror;
mod portal;

pub use edge::RayInteractorEdge;
pub use portal::PortalLink;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::colour::LuxColour;
use crate::error::LightResult;
use crate::heading;
use crate::light::{BeamLightRay, Ray};
use crate::scene::Scene;

/// Behaviour of an interactor when struck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractorKind {
    /// Reflects about the struck edge, tinting by the mirror colour
    Mirror,
    /// Passes light straight through, keeping only shared channels
    ColourFilter,
    /// Teleports light to the linked sibling portal
    Portal(PortalLink),
}

/// A beam segment striking an edge
///
/// `beam` already ends on the struck edge; `left_point` and `right_point`
/// are where its left and right rays meet it.
#[derive(Debug, Clone, Copy)]
pub struct Strike<'a> {
    pub beam: &'a BeamLightRay,
    pub edge: &'a RayInteractorEdge,
    pub left_point: DVec2,
    pub right_point: DVec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interactor {
    /// World position
    pub origin: DVec2,
    /// World heading (unit vector); local +x maps onto it
    pub direction: DVec2,
    pub colour: LuxColour,
    /// Convex hull of the surfaces beams can strike, in local space
    bounds: Vec<RayInteractorEdge>,
    kind: InteractorKind,
}

impl Interactor {
    pub fn new(
        kind: InteractorKind,
        origin: DVec2,
        direction: DVec2,
        colour: LuxColour,
        bounds: Vec<RayInteractorEdge>,
    ) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            colour,
            bounds,
            kind,
        }
    }

    /// Single one-sided mirror of the given width facing `facing`
    pub fn mirror(width: f64, origin: DVec2, facing: DVec2, colour: LuxColour) -> Self {
        Self::new(InteractorKind::Mirror, origin, facing, colour, vec![facing_edge(width)])
    }

    pub fn filter(origin: DVec2, facing: DVec2, colour: LuxColour, bounds: Vec<RayInteractorEdge>) -> Self {
        Self::new(InteractorKind::ColourFilter, origin, facing, colour, bounds)
    }

    /// Unlinked portal: one one-sided edge of the given height facing `facing`
    pub fn portal(height: f64, origin: DVec2, facing: DVec2, colour: LuxColour) -> Self {
        Self::new(
            InteractorKind::Portal(PortalLink::default()),
            origin,
            facing,
            colour,
            vec![facing_edge(height)],
        )
    }

    #[inline]
    pub fn kind(&self) -> &InteractorKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut InteractorKind {
        &mut self.kind
    }

    #[inline]
    pub fn bounds(&self) -> &[RayInteractorEdge] {
        &self.bounds
    }

    #[inline]
    pub fn heading(&self) -> f64 {
        heading(self.direction)
    }

    /// Bounds moved into world space by the current origin and heading
    pub fn world_bounds(&self) -> impl Iterator<Item = RayInteractorEdge> + '_ {
        let heading = self.heading();
        self.bounds.iter().map(move |edge| edge.adjust(self.origin, heading))
    }

    /// Compute the beams leaving this interactor after `strike`
    ///
    /// Never mutates the incoming beam. Returns no beams when the light is
    /// absorbed, exhausted, arrives from behind a one-sided edge, or reaches an
    /// unlinked portal.
    pub fn ray_hit(&self, scene: &Scene, strike: &Strike<'_>, min_length: f64) -> LightResult<Vec<BeamLightRay>> {
        if !strike.edge.faces(strike.beam.direction()) {
            log::trace!("{} struck {} from behind", strike.beam, strike.edge);
            return Ok(Vec::new());
        }
        match &self.kind {
            InteractorKind::Mirror => mirror::ray_hit(self.colour, strike, min_length),
            InteractorKind::ColourFilter => filter::ray_hit(self.colour, strike, min_length),
            InteractorKind::Portal(link) => portal::ray_hit(self, link, scene, strike, min_length),
        }
    }
}

/// Local edge centred on the origin whose normal is local +x
fn facing_edge(size: f64) -> RayInteractorEdge {
    RayInteractorEdge::new(DVec2::new(0.0, -size / 2.0), DVec2::new(0.0, size / 2.0), false)
}

/// Outgoing beam from a pair of `(source, remaining length)` sides
///
/// Both sides share `direction`. Yields nothing once both sides are spent.
fn outgoing(
    colour: LuxColour,
    direction: DVec2,
    left: (DVec2, f64),
    right: (DVec2, f64),
    min_length: f64,
) -> LightResult<Vec<BeamLightRay>> {
    if left.1 <= min_length && right.1 <= min_length {
        return Ok(Vec::new());
    }
    let beam = BeamLightRay::new(
        colour,
        Ray::emitted(left.0, direction, left.1),
        Ray::emitted(right.0, direction, right.1),
    )?;
    Ok(vec![beam])
}
