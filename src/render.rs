//! Drawing a [`Model`] each frame.
//!
//! The scene graph is walked once per frame into a list of
//! [`DrawCommand`]s. Their world matrices go into a single instance-rate
//! buffer, and draw `i` reads matrix `i` by drawing instance range `i..i + 1`.
//! The scene never changes after loading, so the buffer is sized once.

use cgmath::SquareMatrix;
use wgpu::util::DeviceExt;

use crate::data_structures::{
    instance::TransformRaw,
    model::{DrawModel, Model},
    scene_graph::DrawCommand,
};

pub struct SceneRenderer {
    draws: Vec<DrawCommand>,
    transforms: Vec<TransformRaw>,
    transform_buffer: wgpu::Buffer,
    capacity: usize,
}

impl std::fmt::Debug for SceneRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRenderer")
            .field("draws", &self.draws.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, model: &Model) -> Self {
        let capacity = model.scene.draw_count();
        // a zero sized vertex buffer cannot be bound
        let zeroed = vec![TransformRaw::from(&cgmath::Matrix4::<f32>::identity()); capacity.max(1)];
        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transform Buffer"),
            contents: bytemuck::cast_slice(&zeroed),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            draws: Vec::with_capacity(capacity),
            transforms: Vec::with_capacity(capacity),
            transform_buffer,
            capacity,
        }
    }

    pub fn draws(&self) -> &[DrawCommand] {
        &self.draws
    }

    /// Walk the scene graph and upload this frame's world transforms.
    pub fn prepare(&mut self, queue: &wgpu::Queue, model: &Model) {
        model
            .scene
            .collect_draws(&cgmath::Matrix4::identity(), &mut self.draws);
        if self.draws.len() > self.capacity {
            log::warn!(
                "scene produced {} draws but only {} fit the transform buffer",
                self.draws.len(),
                self.capacity
            );
            self.draws.truncate(self.capacity);
        }

        self.transforms.clear();
        self.transforms
            .extend(self.draws.iter().map(TransformRaw::from));
        if !self.transforms.is_empty() {
            queue.write_buffer(
                &self.transform_buffer,
                0,
                bytemuck::cast_slice(&self.transforms),
            );
        }
    }

    /// Issue one indexed draw per prepared command. Expects the pipeline and
    /// bind groups to be set already.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, model: &Model) {
        render_pass.set_vertex_buffer(1, self.transform_buffer.slice(..));
        for (i, draw) in self.draws.iter().enumerate() {
            let Some(mesh) = model.meshes.get(draw.mesh) else {
                log::warn!("draw {} references missing mesh {}", i, draw.mesh);
                continue;
            };
            if mesh.num_elements == 0 {
                continue;
            }
            let i = i as u32;
            render_pass.draw_mesh_instanced(mesh, i..i + 1);
        }
    }
}
