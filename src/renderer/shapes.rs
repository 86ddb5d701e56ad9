//! Quads for beams and interactor edges

use glam::DVec2;

use super::vertex::{Vertex, colors};
use crate::colour::LuxColour;
use crate::error::LightResult;
use crate::light::{BeamId, BeamTree};
use crate::perp;
use crate::scene::Scene;

/// One drawable beam segment, corners in winding order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamQuad {
    pub right_start: DVec2,
    pub right_end: DVec2,
    pub left_end: DVec2,
    pub left_start: DVec2,
    pub colour: LuxColour,
}

/// A quad for every live node below `root`, parents before children
pub fn beam_quads(tree: &BeamTree, root: BeamId) -> LightResult<Vec<BeamQuad>> {
    let nodes = tree.descendants(root)?;
    let mut quads = Vec::with_capacity(nodes.len());
    for id in nodes {
        let Ok(beam) = tree.get(id) else { continue };
        quads.push(BeamQuad {
            right_start: beam.right().source,
            right_end: beam.right().end(),
            left_end: beam.left().end(),
            left_start: beam.left().source,
            colour: beam.colour(),
        });
    }
    Ok(quads)
}

fn push_quad(vertices: &mut Vec<Vertex>, corners: [DVec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners.map(|p| Vertex::at(p, color));
    // Two triangles
    vertices.extend_from_slice(&[a, b, c, c, d, a]);
}

/// Triangulate beam quads, tinted for additive blending
pub fn quad_vertices(quads: &[BeamQuad], alpha: f32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(quads.len() * 6);
    for quad in quads {
        push_quad(
            &mut vertices,
            [quad.right_start, quad.right_end, quad.left_end, quad.left_start],
            quad.colour.to_rgba(alpha),
        );
    }
    vertices
}

/// Every interactor edge in `scene` as a line `thickness` wide
pub fn edge_vertices(scene: &Scene, thickness: f64) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for (_, interactor) in scene.iter() {
        for edge in interactor.world_bounds() {
            let side = perp(edge.direction()) * (thickness / 2.0);
            push_quad(
                &mut vertices,
                [edge.start() - side, edge.end() - side, edge.end() + side, edge.start() + side],
                colors::EDGE,
            );
        }
    }
    vertices
}
