//! Beam propagation
//!
//! Pure and deterministic: the same scene and source beam always produce the
//! same tree, in the same order.
//! - `clip`: beam frame and edge clipping
//! - `sweep`: splitting a beam into sub-beams by nearest edge
//! - `propagate`: recursive rebuild of a beam's subtree
//! - `timing`: optional debug timing wrapper

mod clip;
pub mod propagate;
pub mod sweep;
pub mod timing;

pub use propagate::{propagate, propagate_with};
pub use sweep::{EdgeMap, Sweep, SweepHit, sweep};
pub use timing::{LogSection, propagate_logged};
