//! Debug-level timing around propagation
//!
//! Kept outside the propagation code itself: wrap whatever needs measuring
//! in a [`LogSection`].

use std::time::Instant;

use super::propagate::propagate_with;
use crate::error::LightResult;
use crate::light::{BeamId, BeamTree};
use crate::scene::Scene;
use crate::settings::PropagationSettings;

/// Logs "Starting" on creation and the elapsed time when dropped
///
/// Nothing is logged on drop while unwinding from a panic.
#[derive(Debug)]
pub struct LogSection {
    name: String,
    start: Instant,
}

impl LogSection {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        log::debug!("Starting {name}");
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Milliseconds since the section started
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LogSection {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            log::debug!("Done {} ({:.3}ms)", self.name, self.elapsed_ms());
        }
    }
}

/// [`propagate_with`] inside a [`LogSection`]
pub fn propagate_logged(
    scene: &Scene,
    tree: &mut BeamTree,
    beam: BeamId,
    settings: &PropagationSettings,
) -> LightResult<Vec<BeamId>> {
    let _section = LogSection::new("propagate");
    propagate_with(scene, tree, beam, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::LuxColour;
    use crate::light::BeamLightRay;
    use glam::DVec2;

    #[test]
    fn test_section_measures() {
        let section = LogSection::new("test");
        assert!(section.elapsed_ms() >= 0.0);
    }

    #[test]
    fn test_logged_matches_plain() {
        let mut tree = BeamTree::new();
        let beam = tree.insert(BeamLightRay::emit(LuxColour::WHITE, DVec2::ZERO, DVec2::X, 4.0, 50.0).unwrap());
        let children = propagate_logged(&Scene::new(), &mut tree, beam, &PropagationSettings::default()).unwrap();
        assert_eq!(children.len(), 1);
    }
}
