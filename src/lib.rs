//! Lux Light - finite-width light beams in a 2D scene
//!
//! Core modules:
//! - `colour`: 3-channel additive colour with masking
//! - `light`: Ray / beam value types and the beam ownership tree
//! - `interactor`: Boundary edges plus mirror, colour filter and portal behaviour
//! - `sim`: Beam-vs-edge clipping sweep and recursive propagation
//! - `scene`: Interactor storage, portal pairing and demo scenes
//! - `renderer`: Quad/vertex extraction for an external renderer
//! - `settings`: Propagation configuration

pub mod colour;
pub mod error;
pub mod interactor;
pub mod light;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use colour::LuxColour;
pub use error::{LightError, LightResult};
pub use interactor::{Interactor, InteractorKind, RayInteractorEdge};
pub use light::{BeamId, BeamLightRay, BeamTree, Ray};
pub use scene::{InteractorId, Scene};
pub use settings::PropagationSettings;
pub use sim::{propagate, propagate_with, sweep};

use glam::DVec2;

/// Engine configuration constants
pub mod consts {
    /// Tolerance for all geometric comparisons
    pub const EPSILON: f64 = 1e-6;
    /// Two directions closer than this are treated as identical
    pub const DIRECTION_EPSILON: f64 = 1e-9;
    /// Length of a freshly emitted source beam in the demo scenes
    pub const DEFAULT_BEAM_LENGTH: f64 = 3500.0;
    /// Recursion cap for a single propagation
    pub const DEFAULT_MAX_DEPTH: u32 = 64;
    /// Remaining length at or below which interactors stop emitting
    pub const DEFAULT_MIN_LENGTH: f64 = 1e-3;
}

/// Perpendicular rotated a quarter turn counter-clockwise
#[inline]
pub fn perp(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}

/// Rotate `v` counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: DVec2, angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    DVec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Heading of a direction vector in radians, measured from +x
#[inline]
pub fn heading(dir: DVec2) -> f64 {
    dir.y.atan2(dir.x)
}

/// Reflect a direction about a surface normal
///
/// Splits `dir` into the part along `normal` and the tangential remainder,
/// then flips the normal part: `d' = d - 2(d·n)n`.
#[inline]
pub fn reflect(dir: DVec2, normal: DVec2) -> DVec2 {
    let parallel = normal * dir.dot(normal);
    let tangential = dir - parallel;
    tangential - parallel
}
