//! Error types for beam construction, tree lifecycle and propagation

use glam::DVec2;

use crate::light::BeamId;
use crate::scene::InteractorId;

#[derive(Debug, thiserror::Error)]
pub enum LightError {
    /// Left and right rays of a beam must travel in the same direction
    #[error("beam rays are not parallel: left {left}, right {right}")]
    NonParallelRays { left: DVec2, right: DVec2 },
    /// The beam was killed (or discarded) and can no longer be used
    #[error("beam {0:?} has been killed")]
    DeadBeam(BeamId),
    /// The sweep lost every active edge before reaching the far side of the beam
    #[error("sweep found no active edge at lateral position {position}")]
    NoActiveEdge { position: f64 },
    #[error("interactor {0:?} does not exist")]
    UnknownInteractor(InteractorId),
    #[error("interactor {0:?} is not a portal")]
    NotAPortal(InteractorId),
    #[error("portal {0:?} cannot be linked to itself")]
    SelfLinkedPortal(InteractorId),
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LightResult<T> = Result<T, LightError>;
