//! Vertex type handed to an external renderer

use bytemuck::{Pod, Zeroable};
use glam::DVec2;

/// 2D vertex with position and color, laid out for a GPU vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Narrow a world point to GPU precision
    pub fn at(point: DVec2, color: [f32; 4]) -> Self {
        Self::new(point.x as f32, point.y as f32, color)
    }
}

/// Colors for scene elements
pub mod colors {
    pub const EDGE: [f32; 4] = [0.7, 0.7, 0.8, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
