//! Full-screen fragment shader pipeline
//!
//! Draws one triangle covering the viewport and leaves every pixel to the
//! fragment shader, which reads a single uniform struct `U`.

use std::marker::PhantomData;

use bytemuck::Pod;
use wgpu::util::DeviceExt;

use super::types::{JuliaUniforms, RayTraceUniforms};

/// Vertices of the covering triangle
const FULLSCREEN_VERTICES: u32 = 3;

/// Pipeline for a shader that colors the whole screen
pub struct FullscreenPipeline<U: Pod> {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    _uniforms: PhantomData<U>,
}

/// Ray-traced room with three spheres
pub type RayTracePipeline = FullscreenPipeline<RayTraceUniforms>;

/// Julia set escape-time fractal
pub type JuliaSetPipeline = FullscreenPipeline<JuliaUniforms>;

impl<U: Pod> FullscreenPipeline<U> {
    /// Build a pipeline from WGSL with `vs_main`, `fs_main` and a uniform at
    /// group 0 binding 0 laid out like `U`
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, label: &str, shader_source: &str) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&U::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            _uniforms: PhantomData,
        }
    }

    /// Update uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &U) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Shade every pixel of `view`
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Fullscreen Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..FULLSCREEN_VERTICES, 0..1);
    }
}

impl FullscreenPipeline<RayTraceUniforms> {
    pub fn ray_trace(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self::new(device, surface_format, "Ray Trace", include_str!("../shaders/ray_trace.wgsl"))
    }
}

impl FullscreenPipeline<JuliaUniforms> {
    pub fn julia_set(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self::new(device, surface_format, "Julia Set", include_str!("../shaders/julia_set.wgsl"))
    }
}
