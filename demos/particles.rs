//! Particle fountain
//!
//! Particles launch from above three cylinders, bounce off their tops and
//! settle on the ground, where each keeps spitting out smaller children
//! until it expires.
//!
//! Run with: cargo run --example particles

use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use spacerocks::config::{vec3, AppConfig, WindowConfig};
use spacerocks::input::{InputAction, InputMapper};
use spacerocks::systems::{RenderSystem, SimulationSystem, WindowSystem};
use spacerocks_input::PIXELS_PER_LINE;
use spacerocks_math::Vec3;
use spacerocks_physics::Emitter;
use spacerocks_render::{Camera3D, ShapeBatch};

const BINDINGS: &[(&str, &str)] = &[
    ("Wheel", "zoom"),
    ("R", "reset the fountain"),
    ("F11", "toggle fullscreen"),
    ("Esc", "quit"),
];

struct ParticlesApp {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    simulation: SimulationSystem,
    emitter: Emitter,
    camera: Camera3D,
    batch: ShapeBatch,
    /// Simulation clock built from capped frame times
    sim_time: f32,
    shown_count: Option<usize>,
}

impl ParticlesApp {
    fn new(config: AppConfig) -> Self {
        let settings = &config.particles;
        let emitter = Emitter::fountain(
            settings.to_particle_config(),
            settings.emitter_height,
            settings.seed,
        );
        let camera = Camera3D::new(vec3(settings.camera_eye), vec3(settings.camera_target), Vec3::Y)
            .with_projection(settings.fov, 0.01, 100.0);

        Self {
            window: None,
            render: None,
            simulation: SimulationSystem::default(),
            emitter,
            camera,
            batch: ShapeBatch::new(),
            sim_time: 0.0,
            shown_count: None,
            config,
        }
    }

    fn build_batch(&mut self) {
        self.batch.clear();
        let ground = self.emitter.config.ground;
        for cylinder in self.emitter.obstacles() {
            self.batch.cylinder(cylinder, ground);
        }
        for particle in self.emitter.particles() {
            self.batch.particle(particle);
        }
    }

    fn update_title(&mut self) {
        let count = self.emitter.len();
        if self.shown_count != Some(count) {
            if let Some(window) = &self.window {
                window.update_title(&format!("{} particles", count));
            }
            self.shown_count = Some(count);
        }
    }
}

impl ApplicationHandler for ParticlesApp {
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
            Ok(render) => self.render = Some(render),
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
                    Some(InputAction::Restart) => self.emitter.reset(),
                    Some(InputAction::ToggleFullscreen) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    Some(InputAction::Fire) | None => {}
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let spin = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.camera.wheel(spin);
            }

            WindowEvent::RedrawRequested => {
                let frame = self.simulation.frame();
                self.sim_time += frame.dt;
                self.emitter.update(self.sim_time);

                self.build_batch();
                self.update_title();

                if let Some(render) = &mut self.render {
                    let uniforms = self.camera.uniforms(render.viewport());
                    if let Err(e) = render.render_frame(&uniforms, &self.batch) {
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
        config.window.title = "Particles".to_string();
    }
    log::info!("Starting particle fountain");
    InputMapper::log_bindings("Particles", BINDINGS);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ParticlesApp::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
