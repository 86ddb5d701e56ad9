//! Single boundary ray of a beam

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Immutable edge-ray of a beam
///
/// `length` is how far this side of the beam travels before it stops.
/// `strength` is the distance budget the side started with; clip points
/// interpolate it across the beam's width, and interactors emit new rays with
/// `strength - length` left to travel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub source: DVec2,
    pub direction: DVec2,
    pub length: f64,
    pub strength: f64,
}

impl Ray {
    pub fn new(source: DVec2, direction: DVec2, length: f64, strength: f64) -> Self {
        Self {
            source,
            direction,
            length,
            strength,
        }
    }

    /// A fresh ray whose whole budget is still ahead of it
    pub fn emitted(source: DVec2, direction: DVec2, length: f64) -> Self {
        Self::new(source, direction, length, length)
    }

    pub fn with_source(self, source: DVec2) -> Self {
        Self { source, ..self }
    }

    pub fn with_direction(self, direction: DVec2) -> Self {
        Self { direction, ..self }
    }

    pub fn with_length(self, length: f64) -> Self {
        Self { length, ..self }
    }

    pub fn with_strength(self, strength: f64) -> Self {
        Self { strength, ..self }
    }

    /// Point where this ray stops
    #[inline]
    pub fn end(&self) -> DVec2 {
        self.source + self.direction * self.length
    }

    /// Budget left after travelling the full length, never negative
    #[inline]
    pub fn remaining(&self) -> f64 {
        (self.strength - self.length).max(0.0)
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ray<({:.3}, {:.3}), dir ({:.3}, {:.3}), len {:.3}, str {:.3}>",
            self.source.x, self.source.y, self.direction.x, self.direction.y, self.length, self.strength
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_rays_leave_original_untouched() {
        let ray = Ray::emitted(DVec2::ZERO, DVec2::X, 10.0);
        let moved = ray.with_source(DVec2::new(1.0, 2.0)).with_length(4.0);
        assert_eq!(ray.source, DVec2::ZERO);
        assert_eq!(ray.length, 10.0);
        assert_eq!(moved.source, DVec2::new(1.0, 2.0));
        assert_eq!(moved.length, 4.0);
        assert_eq!(moved.strength, 10.0);
    }

    #[test]
    fn test_end_and_remaining() {
        let ray = Ray::new(DVec2::new(1.0, 0.0), DVec2::Y, 3.0, 5.0);
        assert_eq!(ray.end(), DVec2::new(1.0, 3.0));
        assert_eq!(ray.remaining(), 2.0);
        assert_eq!(ray.with_strength(1.0).remaining(), 0.0);
    }
}
