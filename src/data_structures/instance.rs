//! Per-draw transform data for the GPU.
//!
//! Every draw command gets its world matrix from an instance-rate vertex
//! buffer. The renderer draws each mesh with the single-instance range that
//! points at its own matrix.

use crate::data_structures::{model, scene_graph::DrawCommand};

/**
 * The raw transform is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformRaw {
    model: [[f32; 4]; 4],
}

impl TransformRaw {
    pub fn model(&self) -> [[f32; 4]; 4] {
        self.model
    }
}

impl From<&cgmath::Matrix4<f32>> for TransformRaw {
    fn from(world: &cgmath::Matrix4<f32>) -> Self {
        Self {
            model: (*world).into(),
        }
    }
}

impl From<&DrawCommand> for TransformRaw {
    fn from(draw: &DrawCommand) -> Self {
        (&draw.world).into()
    }
}

/**
 * stride: one 4x4 matrix, stored as four vec4 columns.
 *
 * Locations 5..=8 leave room for the mesh vertex attributes.
 */
impl model::Vertex for TransformRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<TransformRaw>() as wgpu::BufferAddress,
            // The shader only moves to the next matrix when a new instance starts
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
