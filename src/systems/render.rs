//! GPU rendering system
//!
//! Owns the render context and the shape pipeline, and draws one
//! [`ShapeBatch`] per frame. Full-screen shader demos bring their own
//! [`FullscreenPipeline`] and draw through [`RenderSystem::render_fullscreen`].

use std::sync::Arc;
use winit::window::Window;
use bytemuck::Pod;
use spacerocks_render::{
    ContextError, FullscreenPipeline, RenderContext, ShapeBatch, ShapePipeline, ShapeUniforms,
};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Context(ContextError),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "GPU setup failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: ShapePipeline,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let mut pipeline = ShapePipeline::new(&context, context.config.format);

        // Ensure depth texture exists
        pipeline.ensure_depth_texture(&context, context.config.width, context.config.height);

        Ok(Self {
            context,
            pipeline,
            clear_color: render_config.clear_color(),
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        // A minimized window keeps its previous surface size
        let (width, height) = (self.context.config.width, self.context.config.height);
        self.pipeline.ensure_depth_texture(&self.context, width, height);
    }

    /// Reconfigure the surface after it was lost
    pub fn recover(&mut self) {
        self.context.reconfigure();
    }

    /// Surface size in pixels, for camera uniforms
    pub fn viewport(&self) -> [f32; 2] {
        self.context.viewport()
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        uniforms: &ShapeUniforms,
        batch: &ShapeBatch,
    ) -> Result<(), RenderError> {
        self.pipeline.update_uniforms(&self.context.queue, uniforms);
        self.pipeline
            .upload(&self.context, &self.context.queue, batch.instances());

        let output = self.acquire()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.encoder();

        self.pipeline.render(&mut encoder, &view, self.clear_color);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Render a frame drawn entirely by a full-screen shader
    pub fn render_fullscreen<U: Pod>(
        &mut self,
        pipeline: &FullscreenPipeline<U>,
        uniforms: &U,
    ) -> Result<(), RenderError> {
        pipeline.update_uniforms(&self.context.queue, uniforms);

        let output = self.acquire()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.encoder();

        pipeline.render(&mut encoder, &view);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get surface texture
    fn acquire(&self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.context.surface.get_current_texture() {
            Ok(output) => Ok(output),
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(RenderError::OutOfMemory),
            Err(e) => Err(RenderError::Other(format!("{:?}", e))),
        }
    }

    fn encoder(&self) -> wgpu::CommandEncoder {
        self.context
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            })
    }

    /// The GPU context, for building extra pipelines
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Handle a failed frame: recover lost surfaces, report whether to exit
    pub fn handle_error(&mut self, error: RenderError) -> bool {
        match error {
            RenderError::SurfaceLost => {
                self.recover();
                false
            }
            RenderError::OutOfMemory => {
                log::error!("Out of GPU memory");
                true
            }
            e => {
                log::warn!("{}", e);
                false
            }
        }
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}
