//! Vertex and uniform types for the wheel pipeline

use bytemuck::{Pod, Zeroable};

/// 2D vertex in wheel units (y down, face radius 1.0)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    /// 1.0 if the vertex turns with the wheel, 0.0 for the fixed overlay
    pub spin: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
            spin: 1.0,
        }
    }

    /// Vertex of the fixed overlay (needle)
    pub const fn fixed(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
            spin: 0.0,
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
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Per-frame uniforms (must match `wheel.wgsl`)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct WheelUniforms {
    /// Wheel orientation (radians, clockwise on screen)
    pub rotation: f32,
    pub _pad: f32,
    /// Wheel units to NDC, per axis
    pub scale: [f32; 2],
}

impl WheelUniforms {
    /// Keep the wheel round and inside the viewport with a margin
    pub fn new(rotation: f32, width: u32, height: u32, extent: f32) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let scale = 1.0 / extent.max(f32::EPSILON);
        let scale = if aspect > 1.0 {
            // Wider than tall
            [scale / aspect, scale]
        } else {
            // Taller than wide
            [scale, scale * aspect]
        };
        Self {
            rotation,
            _pad: 0.0,
            scale,
        }
    }
}
