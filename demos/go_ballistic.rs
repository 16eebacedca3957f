//! Go Ballistic
//!
//! Aim a cannon with the arrow keys and fire with F. The dotted arc shows
//! where a shot fired now would fly; the world is Z-up.
//!
//! Run with: cargo run --example go_ballistic

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use spacerocks::config::{vec3, AppConfig, WindowConfig};
use spacerocks::input::{InputAction, InputMapper};
use spacerocks::systems::{RenderSystem, SimulationSystem, WindowSystem};
use spacerocks_input::{ArrowPad, KeyRepeat};
use spacerocks_math::Vec3;
use spacerocks_physics::{Cannon, Projectile};
use spacerocks_render::{Camera3D, ShapeBatch};

const BINDINGS: &[(&str, &str)] = &[
    ("Left/Right", "turn the cannon (hold to repeat)"),
    ("Up/Down", "raise or lower the barrel (hold to repeat)"),
    ("F", "fire"),
    ("R", "reset"),
    ("F11", "toggle fullscreen"),
    ("Esc", "quit"),
];

/// Dots drawn along the barrel
const BARREL_DOTS: usize = 8;

const CANNON_COLOR: [f32; 4] = [0.6, 0.6, 0.65, 1.0];
const ARC_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
const SHOT_COLOR: [f32; 4] = [1.0, 0.4, 0.1, 1.0];
const GROUND_COLOR: [f32; 4] = [0.15, 0.5, 0.15, 1.0];

struct BallisticApp {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    simulation: SimulationSystem,
    key_repeat: KeyRepeat,
    cannon: Cannon,
    /// Flight parameters every shot starts from
    template: Projectile,
    shot: Option<Projectile>,
    /// Predicted flight for the current aim
    arc: Vec<Vec3>,
    camera: Camera3D,
    batch: ShapeBatch,
    status: String,
}

impl BallisticApp {
    fn new(config: AppConfig) -> Self {
        let settings = &config.ballistics;
        let cannon = Cannon::default();
        let template = settings.to_projectile();
        let arc = cannon.arc(&template, settings.arc_step);
        let camera = Camera3D::new(vec3(settings.camera_eye), vec3(settings.camera_target), Vec3::Z)
            .with_projection(settings.fov, 0.01, 100.0);

        Self {
            window: None,
            render: None,
            simulation: SimulationSystem::default(),
            key_repeat: KeyRepeat::new(config.game.key_repeat_delay),
            cannon,
            template,
            shot: None,
            arc,
            camera,
            batch: ShapeBatch::new(),
            status: String::new(),
            config,
        }
    }

    /// Turn an arrow direction into an aim change
    fn aim(&mut self, (dx, dy): (f32, f32)) {
        let step = self.config.ballistics.aim_step;
        if self.cannon.change_aim(dx * step, dy * step) {
            self.arc = self.cannon.arc(&self.template, self.config.ballistics.arc_step);
        }
    }

    fn fire(&mut self) {
        let mut shot = self.template.clone();
        self.cannon.load(&mut shot);
        log::info!(
            "Fired at azimuth {:.0} elevation {:.0}",
            self.cannon.azimuth,
            self.cannon.elevation
        );
        self.shot = Some(shot);
    }

    fn reset(&mut self) {
        self.cannon = Cannon::default();
        self.shot = None;
        self.key_repeat.clear();
        self.arc = self.cannon.arc(&self.template, self.config.ballistics.arc_step);
    }

    fn update(&mut self) {
        let frame = self.simulation.frame();

        if let Some(direction) = self.key_repeat.poll(frame.now).and_then(ArrowPad::direction) {
            self.aim(direction);
        }

        if let Some(shot) = &mut self.shot {
            if shot.is_airborne() && !shot.step(frame.dt) {
                log::info!(
                    "Landed at ({:.2}, {:.2})",
                    shot.position.x,
                    shot.position.y
                );
            }
        }
    }

    fn build_batch(&mut self) {
        self.batch.clear();

        // Landing spot of the predicted arc
        if let Some(end) = self.arc.last() {
            self.batch.dot([end.x, end.y, self.template.ground], 14.0, GROUND_COLOR);
        }
        for point in &self.arc {
            self.batch.dot(point.to_array(), 3.0, ARC_COLOR);
        }

        self.batch.dot(self.cannon.base.to_array(), 16.0, CANNON_COLOR);
        let base = self.cannon.base;
        let muzzle = self.cannon.muzzle();
        for i in 0..=BARREL_DOTS {
            let p = base.lerp(muzzle, i as f32 / BARREL_DOTS as f32);
            self.batch.dot(p.to_array(), 8.0, CANNON_COLOR);
        }

        if let Some(shot) = &self.shot {
            self.batch.dot(shot.position.to_array(), 10.0, SHOT_COLOR);
        }
    }

    fn update_title(&mut self) {
        let flight = match &self.shot {
            Some(shot) if shot.is_airborne() => "in flight".to_string(),
            Some(shot) => format!("landed at ({:.2}, {:.2})", shot.position.x, shot.position.y),
            None => "ready".to_string(),
        };
        let status = format!(
            "azimuth {:.0} elevation {:.0} - {}",
            self.cannon.azimuth, self.cannon.elevation, flight
        );
        if status != self.status {
            if let Some(window) = &self.window {
                window.update_title(&status);
            }
            self.status = status;
        }
    }
}

impl ApplicationHandler for BallisticApp {
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

            WindowEvent::Focused(false) => self.key_repeat.clear(),

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };

                match InputMapper::map_keyboard(key, event.state) {
                    Some(InputAction::Exit) => event_loop.exit(),
                    Some(InputAction::Restart) => self.reset(),
                    Some(InputAction::Fire) if !event.repeat => self.fire(),
                    Some(InputAction::ToggleFullscreen) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    _ => {}
                }

                if let Some(direction) = ArrowPad::direction(key) {
                    match event.state {
                        ElementState::Pressed if !event.repeat => {
                            self.key_repeat.press(key, self.simulation.elapsed());
                            self.aim(direction);
                        }
                        ElementState::Released => self.key_repeat.release(key),
                        _ => {}
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.update();
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
        config.window.title = "Go Ballistic".to_string();
    }
    log::info!("Starting Go Ballistic");
    InputMapper::log_bindings("Go Ballistic", BINDINGS);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = BallisticApp::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
