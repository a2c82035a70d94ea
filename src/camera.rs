//! Orbit camera, projection and the camera uniform.
//!
//! The camera always looks at the origin from a point on a sphere. Yaw and
//! pitch pick the point, the radius is the sphere's size. Dragging with the
//! left mouse button rotates, scrolling zooms.

use cgmath::{Angle, Deg, Matrix4, Point3, Rad, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Pitch is kept strictly away from the poles so `look_at` never flips.
pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_RADIUS: f32 = 1.0;
pub const MAX_RADIUS: f32 = 20.0;
/// Degrees of rotation per pixel of drag.
pub const DEFAULT_SENSITIVITY: f32 = 0.2;
/// Touchpads report scrolling in pixels; this many pixels count as one wheel notch.
pub const PIXELS_PER_LINE: f64 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    radius: f32,
    sensitivity: f32,
}

impl OrbitCamera {
    /// `yaw` and `pitch` are in degrees. Out of range values are clamped.
    pub fn new(yaw: f32, pitch: f32, radius: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            radius: radius.clamp(MIN_RADIUS, MAX_RADIUS),
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Apply a drag of `dx` pixels to the right and `dy` pixels upwards.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Positive `delta` moves the camera closer. The radius stays between
    /// [`MIN_RADIUS`] and [`MAX_RADIUS`].
    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius - delta).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    pub fn position(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = Deg(self.yaw).sin_cos();
        let (sin_pitch, cos_pitch) = Deg(self.pitch).sin_cos();
        Point3::new(
            self.radius * cos_yaw * cos_pitch,
            self.radius * sin_pitch,
            self.radius * sin_yaw * cos_pitch,
        )
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position(), Point3::new(0.0, 0.0, 0.0), Vector3::unit_y())
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(0.0, 0.0, 5.0)
    }
}

#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &OrbitCamera, projection: &Projection) {
        self.view_proj = (projection.calc_matrix() * camera.view_matrix()).into();
    }

    pub fn view_proj(&self) -> [[f32; 4]; 4] {
        self.view_proj
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * Turns winit input into camera motion.
 *
 * Only drags with the left button held rotate. The first cursor position
 * after the button goes down is remembered but not applied, so the camera does
 * not jump to wherever the cursor was when the drag started.
 */
#[derive(Clone, Debug, Default)]
pub struct CameraController {
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_dragging(&mut self, pressed: bool) {
        self.dragging = pressed;
        if !pressed {
            self.last_cursor = None;
        }
    }

    pub fn cursor_moved(&mut self, camera: &mut OrbitCamera, x: f64, y: f64) {
        if !self.dragging {
            self.last_cursor = None;
            return;
        }
        if let Some((last_x, last_y)) = self.last_cursor.replace((x, y)) {
            // screen y grows downwards
            camera.rotate((x - last_x) as f32, (last_y - y) as f32);
        }
    }

    pub fn scrolled(&mut self, camera: &mut OrbitCamera, delta: &MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_LINE) as f32,
        };
        camera.zoom(lines);
    }

    /// Returns `true` if the event was camera input.
    pub fn handle_window_events(&mut self, camera: &mut OrbitCamera, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.set_dragging(*state == ElementState::Pressed);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(camera, position.x, position.y);
                self.dragging
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scrolled(camera, delta);
                true
            }
            _ => false,
        }
    }
}

/// Camera state plus the GPU objects that carry it to the shader.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: OrbitCamera,
    pub controller: CameraController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, camera: OrbitCamera, projection: &Projection) -> Self {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            controller: CameraController::new(),
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) -> bool {
        self.controller.handle_window_events(&mut self.camera, event)
    }

    /// Recompute the view-projection matrix and upload it.
    pub fn update(&mut self, queue: &wgpu::Queue, projection: &Projection) {
        self.uniform.update_view_proj(&self.camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
