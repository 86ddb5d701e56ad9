//! Oriented boundary edge of an interactor

use std::fmt;
use std::hash::{Hash, Hasher};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::rotate;

/// A segment beams can strike
///
/// The normal is the direction rotated a quarter turn clockwise. A one-sided
/// edge (`bi_dir == false`) only reacts to light travelling against its
/// normal; light arriving from behind passes through.
///
/// Equality and hashing are by exact value of `start`, `end` and `bi_dir` so
/// clipped world-space edges can key a map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "EdgeDesc", into = "EdgeDesc")]
pub struct RayInteractorEdge {
    start: DVec2,
    end: DVec2,
    direction: DVec2,
    normal: DVec2,
    bi_dir: bool,
}

impl RayInteractorEdge {
    pub fn new(start: DVec2, end: DVec2, bi_dir: bool) -> Self {
        let direction = (end - start).normalize_or_zero();
        Self {
            start,
            end,
            direction,
            normal: DVec2::new(direction.y, -direction.x),
            bi_dir,
        }
    }

    #[inline]
    pub fn start(&self) -> DVec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> DVec2 {
        self.end
    }

    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.direction
    }

    #[inline]
    pub fn normal(&self) -> DVec2 {
        self.normal
    }

    #[inline]
    pub fn bi_dir(&self) -> bool {
        self.bi_dir
    }

    #[inline]
    pub fn diff(&self) -> DVec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.diff().length()
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        (self.start + self.end) / 2.0
    }

    /// Whether light travelling along `direction` reacts to this edge
    #[inline]
    pub fn faces(&self, direction: DVec2) -> bool {
        self.bi_dir || direction.dot(self.normal) < 0.0
    }

    /// Transform from the owner's local frame into world space
    pub fn adjust(&self, origin: DVec2, heading: f64) -> Self {
        Self::new(
            origin + rotate(self.start, heading),
            origin + rotate(self.end, heading),
            self.bi_dir,
        )
    }

    fn key(&self) -> [u64; 4] {
        // Adding zero folds -0.0 into 0.0 so equal values hash equally
        [
            (self.start.x + 0.0).to_bits(),
            (self.start.y + 0.0).to_bits(),
            (self.end.x + 0.0).to_bits(),
            (self.end.y + 0.0).to_bits(),
        ]
    }
}

impl PartialEq for RayInteractorEdge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key() && self.bi_dir == other.bi_dir
    }
}

impl Eq for RayInteractorEdge {}

impl Hash for RayInteractorEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
        self.bi_dir.hash(state);
    }
}

impl fmt::Display for RayInteractorEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Edge<({:.3}, {:.3}) -> ({:.3}, {:.3}){}>",
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            if self.bi_dir { ", both sides" } else { "" }
        )
    }
}

/// Serialized form: derived fields are rebuilt on load
#[derive(Serialize, Deserialize)]
struct EdgeDesc {
    start: DVec2,
    end: DVec2,
    #[serde(default)]
    bi_dir: bool,
}

impl From<EdgeDesc> for RayInteractorEdge {
    fn from(desc: EdgeDesc) -> Self {
        Self::new(desc.start, desc.end, desc.bi_dir)
    }
}

impl From<RayInteractorEdge> for EdgeDesc {
    fn from(edge: RayInteractorEdge) -> Self {
        Self {
            start: edge.start,
            end: edge.end,
            bi_dir: edge.bi_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_direction_and_normal() {
        let edge = RayInteractorEdge::new(DVec2::new(0.0, -1.0), DVec2::new(0.0, 1.0), false);
        assert_eq!(edge.direction(), DVec2::Y);
        assert_eq!(edge.normal(), DVec2::X);
        assert_eq!(edge.length(), 2.0);
        assert_eq!(edge.center(), DVec2::ZERO);
    }

    #[test]
    fn test_one_sided_faces() {
        let edge = RayInteractorEdge::new(DVec2::new(0.0, -1.0), DVec2::new(0.0, 1.0), false);
        // Normal points east: light travelling west hits the front
        assert!(edge.faces(DVec2::new(-1.0, 0.0)));
        assert!(!edge.faces(DVec2::new(1.0, 0.0)));
        let two_sided = RayInteractorEdge::new(edge.start(), edge.end(), true);
        assert!(two_sided.faces(DVec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_adjust_rotates_then_translates() {
        let edge = RayInteractorEdge::new(DVec2::new(0.0, -1.0), DVec2::new(0.0, 1.0), true);
        let world = edge.adjust(DVec2::new(10.0, 0.0), FRAC_PI_2);
        assert!((world.start() - DVec2::new(11.0, 0.0)).length() < 1e-12);
        assert!((world.end() - DVec2::new(9.0, 0.0)).length() < 1e-12);
        assert!(world.bi_dir());

        let flipped = edge.adjust(DVec2::ZERO, PI);
        assert!((flipped.normal() - DVec2::new(-1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_value_keyed_map() {
        let a = RayInteractorEdge::new(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), true);
        let b = RayInteractorEdge::new(DVec2::new(-0.0, 0.0), DVec2::new(1.0, 0.0), true);
        let c = RayInteractorEdge::new(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), false);
        let mut map = HashMap::new();
        map.insert(a, 1);
        assert_eq!(map.get(&b), Some(&1));
        assert_eq!(map.get(&c), None);
    }

    #[test]
    fn test_serde_rebuilds_derived_fields() {
        let edge = RayInteractorEdge::new(DVec2::new(1.0, 1.0), DVec2::new(4.0, 5.0), false);
        let json = serde_json::to_string(&edge).unwrap();
        let back: RayInteractorEdge = serde_json::from_str(&json).unwrap();
        assert_eq!(back, edge);
        assert!((back.direction() - DVec2::new(0.6, 0.8)).length() < 1e-12);
    }
}
