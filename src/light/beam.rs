//! Finite-width beam made of two parallel boundary rays

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ray::Ray;
use crate::colour::LuxColour;
use crate::consts::DIRECTION_EPSILON;
use crate::error::{LightError, LightResult};
use crate::perp;

/// A corridor of light bounded by a left and a right ray
///
/// "Left" is taken looking along the direction of travel. The two rays must
/// share a direction; their sources may sit on a line that is oblique to it
/// (a beam leaving a slanted mirror starts along the mirror).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamLightRay {
    colour: LuxColour,
    left: Ray,
    right: Ray,
}

impl BeamLightRay {
    pub fn new(colour: LuxColour, left: Ray, right: Ray) -> LightResult<Self> {
        if (left.direction - right.direction).length_squared() > DIRECTION_EPSILON * DIRECTION_EPSILON {
            return Err(LightError::NonParallelRays {
                left: left.direction,
                right: right.direction,
            });
        }
        Ok(Self { colour, left, right })
    }

    /// Beam of the given width centred on `origin`, with its full budget ahead
    pub fn emit(colour: LuxColour, origin: DVec2, direction: DVec2, width: f64, length: f64) -> LightResult<Self> {
        let direction = direction.normalize_or_zero();
        let half = perp(direction) * (width / 2.0);
        Self::new(
            colour,
            Ray::emitted(origin + half, direction, length),
            Ray::emitted(origin - half, direction, length),
        )
    }

    #[inline]
    pub fn colour(&self) -> LuxColour {
        self.colour
    }

    #[inline]
    pub fn left(&self) -> &Ray {
        &self.left
    }

    #[inline]
    pub fn right(&self) -> &Ray {
        &self.right
    }

    /// Shared direction of travel
    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.right.direction
    }

    /// Midpoint between the two sources
    #[inline]
    pub fn origin(&self) -> DVec2 {
        (self.left.source + self.right.source) / 2.0
    }

    /// Unit vector across the beam, pointing from the right side to the left
    #[inline]
    pub fn normal(&self) -> DVec2 {
        perp(self.direction())
    }

    /// Signed width measured across the direction of travel
    ///
    /// Negative when the "left" ray actually sits to the right.
    #[inline]
    pub fn width(&self) -> f64 {
        (self.left.source - self.right.source).dot(self.normal())
    }
}

impl fmt::Display for BeamLightRay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = self.origin();
        write!(f, "BeamLightRay<({:.3}, {:.3}): {}>", origin.x, origin.y, self.colour)
    }
}
