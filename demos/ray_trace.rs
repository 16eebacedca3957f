//! Ray Trace
//!
//! A room of six colored walls with three spheres circling their common
//! center, one of them chrome. Every pixel is ray traced in the fragment
//! shader, with Phong shading and shadows from a single point light.
//!
//! Run with: cargo run --example ray_trace

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use spacerocks::config::{AppConfig, WindowConfig};
use spacerocks::input::{InputAction, InputMapper};
use spacerocks::systems::{RenderSystem, SimulationSystem, WindowSystem};
use spacerocks_render::{RayTracePipeline, RayTraceScene};

const BINDINGS: &[(&str, &str)] = &[
    ("R", "restart the animation"),
    ("F11", "toggle fullscreen"),
    ("Esc", "quit"),
];

struct RayTraceApp {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    pipeline: Option<RayTracePipeline>,
    simulation: SimulationSystem,
    scene: RayTraceScene,
    /// Animation clock built from capped frame times
    sim_time: f32,
}

impl RayTraceApp {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            render: None,
            pipeline: None,
            simulation: SimulationSystem::default(),
            scene: RayTraceScene::default(),
            sim_time: 0.0,
        }
    }
}

impl ApplicationHandler for RayTraceApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        match RenderSystem::new(window.window().clone(), &self.config.rendering, self.config.window.vsync) {
            Ok(render) => {
                let context = render.context();
                self.pipeline = Some(RayTracePipeline::ray_trace(context, context.config.format));
                self.render = Some(render);
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match InputMapper::map_keyboard(key, event.state) {
                    Some(InputAction::Exit) => event_loop.exit(),
                    Some(InputAction::Restart) => self.sim_time = 0.0,
                    Some(InputAction::ToggleFullscreen) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    Some(InputAction::Fire) | None => {}
                }
            }

            WindowEvent::RedrawRequested => {
                self.sim_time += self.simulation.frame().dt;

                if let (Some(render), Some(pipeline)) = (&mut self.render, &self.pipeline) {
                    let uniforms = self.scene.uniforms(self.sim_time, render.viewport());
                    if let Err(e) = render.render_fullscreen(pipeline, &uniforms) {
                        if render.handle_error(e) {
                            event_loop.exit();
                        }
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    let mut config = AppConfig::load_and_init_logging();
    if config.window.title == WindowConfig::default().title {
        config.window.title = "Ray Trace".to_string();
    }
    log::info!("Starting ray tracer");
    InputMapper::log_bindings("Ray Trace", BINDINGS);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = RayTraceApp::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
