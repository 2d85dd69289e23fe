//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER_HULL: [f32; 4] = [0.3, 0.55, 1.0, 1.0];
    pub const PLAYER_COCKPIT: [f32; 4] = [0.75, 0.9, 1.0, 1.0];
    pub const METEOR: [f32; 4] = [0.55, 0.4, 0.3, 1.0];
    pub const PLASMA: [f32; 4] = [0.85, 0.3, 0.95, 0.55];
    pub const LASER: [f32; 4] = [0.4, 0.85, 1.0, 1.0];
    pub const EXPLOSION_CORE: [f32; 4] = [1.0, 0.9, 0.5, 1.0];
    pub const EXPLOSION_RING: [f32; 4] = [1.0, 0.45, 0.1, 1.0];
    /// Playing background (English violet)
    pub const BACKGROUND: [f32; 4] = [0.27, 0.21, 0.31, 1.0];
    /// Menu background (Japanese violet)
    pub const MENU_BACKGROUND: [f32; 4] = [0.36, 0.2, 0.34, 1.0];
}
