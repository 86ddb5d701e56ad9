//! Clipping world-space edges to a beam's corridor
//!
//! Everything here works in the beam's own frame: `u` is the lateral offset
//! from the right source towards the left source, and `depth` is the distance
//! travelled along the beam direction past the (possibly oblique) base line
//! joining the two sources. That map is affine, so segments stay segments and
//! the corridor becomes the quadrilateral `0 <= u <= width`,
//! `0 <= depth <= range(u)`.

use glam::DVec2;

use crate::consts::{DIRECTION_EPSILON, EPSILON};
use crate::interactor::RayInteractorEdge;
use crate::light::BeamLightRay;
use crate::perp;

/// Reference frame of a beam
#[derive(Debug, Clone)]
pub struct BeamFrame {
    pub right_source: DVec2,
    pub left_source: DVec2,
    pub direction: DVec2,
    /// Unit vector across the beam, right to left
    pub lateral: DVec2,
    pub width: f64,
    /// How far the left source sits ahead of the right one along `direction`
    skew: f64,
    right_length: f64,
    left_length: f64,
    right_strength: f64,
    left_strength: f64,
}

impl BeamFrame {
    pub fn new(beam: &BeamLightRay) -> Self {
        let (left, right) = (beam.left(), beam.right());
        let direction = beam.direction();
        let lateral = perp(direction);
        let across = left.source - right.source;
        Self {
            right_source: right.source,
            left_source: left.source,
            direction,
            lateral,
            width: across.dot(lateral),
            skew: across.dot(direction),
            right_length: right.length,
            left_length: left.length,
            right_strength: right.strength,
            left_strength: left.strength,
        }
    }

    #[inline]
    fn fraction(&self, u: f64) -> f64 {
        u / self.width
    }

    /// World point to `(u, depth)`
    pub fn to_local(&self, point: DVec2) -> DVec2 {
        let rel = point - self.right_source;
        let u = rel.dot(self.lateral);
        DVec2::new(u, rel.dot(self.direction) - self.skew * self.fraction(u))
    }

    /// Point on the base line at lateral offset `u`
    pub fn base_at(&self, u: f64) -> DVec2 {
        self.right_source.lerp(self.left_source, self.fraction(u))
    }

    pub fn point_at(&self, u: f64, depth: f64) -> DVec2 {
        self.base_at(u) + self.direction * depth
    }

    /// Maximum depth reachable at lateral offset `u`
    pub fn range_at(&self, u: f64) -> f64 {
        self.right_length + (self.left_length - self.right_length) * self.fraction(u)
    }

    pub fn strength_at(&self, u: f64) -> f64 {
        self.right_strength + (self.left_strength - self.right_strength) * self.fraction(u)
    }

    /// Synthetic edge joining the two maximum-range end points
    pub fn back_edge(&self) -> ClippedEdge {
        let right_sink = self.point_at(0.0, self.right_length);
        let left_sink = self.point_at(self.width, self.left_length);
        ClippedEdge {
            edge: RayInteractorEdge::new(right_sink, left_sink, true),
            lo: DVec2::new(0.0, self.right_length),
            hi: DVec2::new(self.width, self.left_length),
        }
    }
}

/// An edge clipped to the corridor
///
/// `lo` and `hi` are the `(u, depth)` end points, `lo.x < hi.x`.
#[derive(Debug, Clone, Copy)]
pub struct ClippedEdge {
    pub edge: RayInteractorEdge,
    pub lo: DVec2,
    pub hi: DVec2,
}

impl ClippedEdge {
    /// Change in depth per unit of `u`
    #[inline]
    pub fn slope(&self) -> f64 {
        (self.hi.y - self.lo.y) / (self.hi.x - self.lo.x)
    }

    /// Depth of the edge's line at lateral offset `u`
    #[inline]
    pub fn depth_at(&self, u: f64) -> f64 {
        self.lo.y + self.slope() * (u - self.lo.x)
    }
}

/// Clip a world-space edge to the beam corridor
///
/// Returns `None` for edges the beam cannot strike: parallel to the beam,
/// facing away (one-sided), entirely behind the base, entirely past the
/// maximum range, outside the sides, or with no lateral extent left.
pub fn clip_edge(frame: &BeamFrame, edge: &RayInteractorEdge) -> Option<ClippedEdge> {
    if edge.direction().dot(frame.direction).abs() >= 1.0 - DIRECTION_EPSILON {
        log::trace!("{edge}: parallel to beam");
        return None;
    }
    if !edge.faces(frame.direction) {
        log::trace!("{edge}: facing away");
        return None;
    }

    let a = frame.to_local(edge.start());
    let b = frame.to_local(edge.end());

    if a.y <= EPSILON && b.y <= EPSILON {
        log::trace!("{edge}: behind beam");
        return None;
    }
    let past_range = |p: DVec2| p.y >= frame.range_at(p.x) - EPSILON;
    if past_range(a) && past_range(b) {
        log::trace!("{edge}: beyond beam");
        return None;
    }

    let inside = |p: DVec2| p.x > EPSILON && p.x < frame.width - EPSILON && p.y >= 0.0 && p.y <= frame.range_at(p.x);
    let (s0, s1) = if inside(a) && inside(b) {
        (0.0, 1.0)
    } else {
        // Each boundary is a linear constraint p + q*s >= 0 along the edge
        let back = |p: DVec2| frame.range_at(p.x) - p.y;
        let constraints = [
            (a.x, b.x - a.x),                         // right side
            (frame.width - a.x, a.x - b.x),           // left side
            (a.y, b.y - a.y),                         // base
            (back(a), back(b) - back(a)),             // maximum range
        ];
        let mut s0: f64 = 0.0;
        let mut s1: f64 = 1.0;
        for (p, q) in constraints {
            if q.abs() < DIRECTION_EPSILON {
                if p < -EPSILON {
                    log::trace!("{edge}: outside beam");
                    return None;
                }
            } else if q > 0.0 {
                s0 = s0.max(-p / q);
            } else {
                s1 = s1.min(-p / q);
            }
        }
        if s0 >= s1 {
            log::trace!("{edge}: misses beam");
            return None;
        }
        (s0, s1)
    };

    let clamp = |p: DVec2| DVec2::new(p.x.clamp(0.0, frame.width), p.y.max(0.0));
    let la = clamp(a.lerp(b, s0));
    let lb = clamp(a.lerp(b, s1));
    if (lb.x - la.x).abs() < EPSILON {
        log::trace!("{edge}: no lateral extent inside beam");
        return None;
    }

    let clipped = RayInteractorEdge::new(
        edge.start().lerp(edge.end(), s0),
        edge.start().lerp(edge.end(), s1),
        edge.bi_dir(),
    );
    let (lo, hi) = if la.x < lb.x { (la, lb) } else { (lb, la) };
    Some(ClippedEdge { edge: clipped, lo, hi })
}
