//! Seeded random scenes for stress runs
//!
//! The same seed always yields the same scene.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::Scene;
use crate::colour::LuxColour;
use crate::interactor::{Interactor, RayInteractorEdge};

const MIN_SIZE: f64 = 20.0;
const MAX_SIZE: f64 = 200.0;

/// Scatter `count` mirrors and filters inside `[0, extent]`
pub fn random_scene(seed: u64, count: usize, extent: DVec2) -> Scene {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut scene = Scene::new();
    for _ in 0..count {
        scene.insert(random_interactor(&mut rng, extent));
    }
    scene
}

fn random_interactor(rng: &mut impl Rng, extent: DVec2) -> Interactor {
    let origin = DVec2::new(rng.random::<f64>() * extent.x, rng.random::<f64>() * extent.y);
    let angle = rng.random::<f64>() * std::f64::consts::TAU;
    let facing = DVec2::new(angle.cos(), angle.sin());
    let size = rng.random_range(MIN_SIZE..MAX_SIZE);
    let colour = random_colour(rng);

    if rng.random_bool(0.5) {
        Interactor::mirror(size, origin, facing, colour)
    } else {
        let half = size / 2.0;
        let edge = RayInteractorEdge::new(DVec2::new(0.0, -half), DVec2::new(0.0, half), rng.random_bool(0.5));
        Interactor::filter(origin, facing, colour, vec![edge])
    }
}

fn random_colour(rng: &mut impl Rng) -> LuxColour {
    loop {
        let colour = LuxColour::new(rng.random_bool(0.5), rng.random_bool(0.5), rng.random_bool(0.5));
        if !colour.is_black() {
            return colour;
        }
    }
}
