//! Application event loop.
//!
//! The viewer is a single winit [`ApplicationHandler`]. Each frame follows
//! the same pattern:
//! 1. winit delivers window events; mouse input goes to the camera controller
//! 2. on `RedrawRequested` the camera uniform is refreshed
//! 3. the scene graph is traversed into draw commands and their transforms uploaded
//! 4. one render pass draws every command, then the frame is presented
//!
//! Presentation is vsync paced, which is what throttles the loop.

use std::{iter, sync::Arc};

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::ViewerConfig,
    context::Context,
    data_structures::{model::Model, scene_graph::Scene},
    render::SceneRenderer,
    resources::load_scene,
};

/// Everything that exists once a window and device are up.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    model: Model,
    renderer: SceneRenderer,
    is_surface_configured: bool,
    needs_reconfigure: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &ViewerConfig, scene: Scene) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config).await?;
        let model = Model::upload(scene, &ctx.device);
        let renderer = SceneRenderer::new(&ctx.device, &model);
        log::info!(
            "uploaded {} meshes, {} draws per frame",
            model.meshes.len(),
            model.scene.draw_count()
        );
        Ok(Self {
            ctx,
            model,
            renderer,
            is_surface_configured: false,
            needs_reconfigure: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
        }
    }

    /// Reconfigure the surface for the window's current size.
    fn reconfigure(&mut self) {
        let size = self.ctx.window.inner_size();
        self.resize(size.width, size.height);
    }

    fn acquire_frame(&mut self) -> Option<wgpu::SurfaceTexture> {
        match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(frame) => Some(frame),
            wgpu::CurrentSurfaceTexture::Suboptimal(frame) => {
                self.needs_reconfigure = true;
                Some(frame)
            }
            // try again on the next redraw
            wgpu::CurrentSurfaceTexture::Timeout | wgpu::CurrentSurfaceTexture::Occluded => None,
            wgpu::CurrentSurfaceTexture::Outdated | wgpu::CurrentSurfaceTexture::Lost => {
                self.reconfigure();
                None
            }
            wgpu::CurrentSurfaceTexture::Validation => {
                log::error!("Unable to acquire a frame: surface validation failed");
                None
            }
        }
    }

    fn render(&mut self) {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return;
        }

        self.ctx
            .camera
            .update(&self.ctx.queue, &self.ctx.projection);
        self.renderer.prepare(&self.ctx.queue, &self.model);

        let Some(output) = self.acquire_frame() else {
            return;
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            render_pass.set_pipeline(&self.ctx.pipeline);
            render_pass.set_bind_group(0, &self.ctx.camera.bind_group, &[]);
            render_pass.set_bind_group(1, &self.ctx.material.bind_group, &[]);
            self.renderer.draw(&mut render_pass, &self.model);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();

        if self.needs_reconfigure {
            self.needs_reconfigure = false;
            self.reconfigure();
        }
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: ViewerConfig,
    // moved into `state` once the device exists
    scene: Option<Scene>,
    state: Option<AppState>,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: ViewerConfig, scene: Scene) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            config,
            scene: Some(scene),
            state: None,
            error: None,
        })
    }

    // reported by `run`'s caller
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(scene) = self.scene.take() else {
            // already initialized, e.g. resumed after a suspend
            return;
        };

        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let init = AppState::new(window, &self.config, scene);
        match self.async_runtime.block_on(init) {
            Ok(mut state) => {
                state.reconfigure();
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.ctx.camera.handle_window_events(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => state.render(),
            _ => {}
        }
    }
}

/// Start logging. `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }
}

/// Import the configured model. The error is returned, not logged.
pub fn load_model(config: &ViewerConfig) -> anyhow::Result<Scene> {
    load_scene(&config.model_path)
        .with_context(|| format!("could not import {:?}", config.model_path))
}

/// Open a window showing `scene` and block until it is closed.
pub fn run(config: ViewerConfig, scene: Scene) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, scene)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
