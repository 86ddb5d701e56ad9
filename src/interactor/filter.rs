//! Colour filter: geometry passes straight through, channels are masked

use crate::colour::LuxColour;
use crate::error::LightResult;
use crate::light::BeamLightRay;

use super::{Strike, outgoing};

pub(super) fn ray_hit(filter: LuxColour, strike: &Strike<'_>, min_length: f64) -> LightResult<Vec<BeamLightRay>> {
    let colour = filter.mask(strike.beam.colour());
    if colour.is_black() {
        log::trace!("{} absorbed by {} filter", strike.beam, filter);
        return Ok(Vec::new());
    }

    outgoing(
        colour,
        strike.beam.direction(),
        (strike.left_point, strike.beam.left().remaining()),
        (strike.right_point, strike.beam.right().remaining()),
        min_length,
    )
}
