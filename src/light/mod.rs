//! Light primitives
//!
//! A [`Ray`] is one boundary of a beam, a [`BeamLightRay`] pairs two parallel
//! rays into a corridor of light, and the [`BeamTree`] owns every beam
//! produced by propagation.

pub mod beam;
pub mod ray;
pub mod tree;

pub use beam::BeamLightRay;
pub use ray::Ray;
pub use tree::{BeamId, BeamNode, BeamTree};
