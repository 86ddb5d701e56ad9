//! Render extraction
//!
//! Turns a propagated beam tree into vertex data. Drawing itself happens in
//! the host application, typically with additive blending so overlapping
//! channels combine.

pub mod shapes;
pub mod vertex;

pub use shapes::{BeamQuad, beam_quads, edge_vertices, quad_vertices};
pub use vertex::Vertex;
