//! Flat mirror

use crate::colour::LuxColour;
use crate::error::LightResult;
use crate::light::BeamLightRay;
use crate::reflect;

use super::{Strike, outgoing};

pub(super) fn ray_hit(tint: LuxColour, strike: &Strike<'_>, min_length: f64) -> LightResult<Vec<BeamLightRay>> {
    let colour = tint.mask(strike.beam.colour());
    if colour.is_black() {
        return Ok(Vec::new());
    }

    let direction = reflect(strike.beam.direction(), strike.edge.normal());

    // Reflection flips handedness: the incoming right side leaves on the left
    outgoing(
        colour,
        direction,
        (strike.right_point, strike.beam.right().remaining()),
        (strike.left_point, strike.beam.left().remaining()),
        min_length,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactor::RayInteractorEdge;
    use crate::light::Ray;
    use glam::DVec2;
    use proptest::prelude::*;

    /// Beam travelling east between y = -1 and y = 1, ending on the line y = x
    fn strike_setup() -> (BeamLightRay, RayInteractorEdge) {
        let beam = BeamLightRay::new(
            LuxColour::WHITE,
            Ray::new(DVec2::new(-10.0, 1.0), DVec2::X, 11.0, 100.0),
            Ray::new(DVec2::new(-10.0, -1.0), DVec2::X, 9.0, 100.0),
        )
        .unwrap();
        let edge = RayInteractorEdge::new(DVec2::new(5.0, 5.0), DVec2::new(-5.0, -5.0), false);
        (beam, edge)
    }

    #[test]
    fn test_reflects_east_to_north() {
        let (beam, edge) = strike_setup();
        assert!((edge.normal() - DVec2::new(-1.0, 1.0).normalize()).length() < 1e-12);
        let strike = Strike {
            beam: &beam,
            edge: &edge,
            left_point: DVec2::new(1.0, 1.0),
            right_point: DVec2::new(-1.0, -1.0),
        };
        let out = ray_hit(LuxColour::WHITE, &strike, 1e-3).unwrap();
        assert_eq!(out.len(), 1);
        let child = &out[0];
        assert!((child.direction() - DVec2::Y).length() < 1e-9);
        // Old right side is now on the left (west when travelling north)
        assert_eq!(child.left().source, DVec2::new(-1.0, -1.0));
        assert_eq!(child.right().source, DVec2::new(1.0, 1.0));
        assert!((child.left().length - 91.0).abs() < 1e-9);
        assert!((child.right().length - 89.0).abs() < 1e-9);
        assert!(child.width() > 0.0);
    }

    #[test]
    fn test_tint_masks_and_absorbs() {
        let (beam, edge) = strike_setup();
        let strike = Strike {
            beam: &beam,
            edge: &edge,
            left_point: DVec2::new(1.0, 1.0),
            right_point: DVec2::new(-1.0, -1.0),
        };
        let out = ray_hit(LuxColour::GREEN, &strike, 1e-3).unwrap();
        assert_eq!(out[0].colour(), LuxColour::GREEN);

        let red = BeamLightRay::new(LuxColour::RED, *beam.left(), *beam.right()).unwrap();
        let strike = Strike { beam: &red, ..strike };
        assert!(ray_hit(LuxColour::CYAN, &strike, 1e-3).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn reflection_matches_formula(angle in 0.0f64..std::f64::consts::TAU, tilt in 0.05f64..3.09) {
            let dir = DVec2::new(angle.cos(), angle.sin());
            let beam = BeamLightRay::emit(LuxColour::WHITE, DVec2::ZERO, dir, 2.0, 50.0).unwrap();
            // Edge oriented so that its normal opposes the beam
            let edge_dir = crate::rotate(dir, tilt);
            let edge = RayInteractorEdge::new(DVec2::ZERO, edge_dir, true);
            let strike = Strike {
                beam: &beam,
                edge: &edge,
                left_point: beam.left().source + dir,
                right_point: beam.right().source + dir,
            };
            let out = ray_hit(LuxColour::WHITE, &strike, 1e-3).unwrap();
            prop_assert_eq!(out.len(), 1);
            let n = edge.normal();
            let expected = dir - 2.0 * dir.dot(n) * n;
            prop_assert!((out[0].direction() - expected).length() < 1e-9);
            prop_assert!((out[0].direction().length() - 1.0).abs() < 1e-9);
        }
    }
}
