//! SpaceRocks - asteroid dodging across a map of gravity wells
//!
//! Fly the ship between planets, land on them, and dodge the asteroids that
//! home in on where the ship was when they spawned.

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use spacerocks::config::AppConfig;
use spacerocks::input::{InputAction, InputMapper};
use spacerocks::systems::{RenderSystem, SimulationSystem, WindowSystem};
use spacerocks_core::{GameEvent, GameState, SpaceRocks, WorldLayout};
use spacerocks_input::{ArrowPad, KeyRepeat, SpriteDragController};
use spacerocks_render::{Camera2D, ShapeBatch};

const BINDINGS: &[(&str, &str)] = &[
    ("Arrows", "move the ship (hold to repeat)"),
    ("Left drag", "move the ship"),
    ("Wheel", "resize the ship"),
    ("R", "restart"),
    ("F11", "toggle fullscreen"),
    ("Esc", "quit"),
];

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    simulation: SimulationSystem,
    game: SpaceRocks,
    key_repeat: KeyRepeat,
    drag: SpriteDragController,
    camera: Camera2D,
    batch: ShapeBatch,
    /// Last status shown in the title, to avoid resetting it every frame
    status: String,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let layout = WorldLayout::load_or_default(&config.scene.layout_path);
        let game = SpaceRocks::new(config.game.to_game_config(), layout.to_world_map());

        Self {
            simulation: SimulationSystem::new(config.game.tick_rate),
            key_repeat: KeyRepeat::new(config.game.key_repeat_delay),
            drag: SpriteDragController::new(config.window.width, config.window.height),
            camera: Camera2D::new(),
            batch: ShapeBatch::new(),
            status: String::new(),
            window: None,
            render: None,
            game,
            config,
        }
    }

    fn restart(&mut self) {
        self.game.restart();
        self.key_repeat.clear();
        self.simulation.reset_accumulator();
    }

    /// Advance the game by however many ticks this frame completed
    fn update(&mut self) {
        let frame = self.simulation.frame();

        if let Some(direction) = self.key_repeat.poll(frame.now).and_then(ArrowPad::direction) {
            self.game.step_actor(direction);
        }

        for _ in 0..frame.ticks {
            for event in self.game.tick() {
                log_event(&event);
            }
        }
    }

    fn build_batch(&mut self) {
        let colors = &self.config.rendering;
        self.batch.clear();

        for planet in self.game.world().current_frame().planets() {
            if self.config.debug.show_gravity_reach {
                self.batch.planet(planet, colors.planet_color);
            } else {
                self.batch.disk([planet.position.x, planet.position.y, 0.0], planet.radius(), colors.planet_color);
            }
        }
        for asteroid in self.game.asteroids().values() {
            self.batch.asteroid(asteroid, colors.asteroid_color);
        }

        let actor = self.game.actor();
        self.batch.sprite(actor, colors.actor_color);
        if self.drag.is_hovering() {
            self.batch.sprite_outline(actor, colors.outline_width, colors.outline_color);
        }
    }

    fn update_title(&mut self) {
        let status = match self.game.state() {
            GameState::Playing => format!(
                "frame {} lives {} score {}",
                self.game.world().current(),
                self.game.lives(),
                self.game.score()
            ),
            GameState::GameOver => format!("GAME OVER score {} - R to restart", self.game.score()),
        };
        if status != self.status {
            if let Some(window) = &self.window {
                window.update_title(&status);
            }
            self.status = status;
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Landed { planet } => log::info!("Landed on planet {}", planet),
        GameEvent::FrameChanged { from, to } => log::info!("Flew from frame {} to {}", from, to),
        GameEvent::AsteroidSpawned(key) => log::debug!("Asteroid {:?} spawned", key),
        GameEvent::Dodged(key) => log::debug!("Asteroid {:?} dodged", key),
        GameEvent::ActorHit { lives } => log::info!("Hit! {} lives left", lives),
        GameEvent::GameOver { score } => log::info!("Game over with score {}", score),
    }
}

impl ApplicationHandler for App {
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
                let (width, height) = render.size();
                self.drag.resize(width, height);
                self.render = Some(render);
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        self.update_title();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
                self.drag.resize(physical_size.width, physical_size.height);
            }

            WindowEvent::Focused(false) => {
                self.key_repeat.clear();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };

                match InputMapper::map_keyboard(key, event.state) {
                    Some(InputAction::Exit) => event_loop.exit(),
                    Some(InputAction::Restart) => self.restart(),
                    Some(InputAction::ToggleFullscreen) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    Some(InputAction::Fire) | None => {}
                }

                if let Some(direction) = ArrowPad::direction(key) {
                    match event.state {
                        // OS repeats are ignored; KeyRepeat handles holding
                        ElementState::Pressed if !event.repeat => {
                            self.key_repeat.press(key, self.simulation.elapsed());
                            self.game.step_actor(direction);
                        }
                        ElementState::Released => self.key_repeat.release(key),
                        _ => {}
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(actor) = self.game.steerable_actor() {
                    self.drag.cursor_moved(actor, position);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(actor) = self.game.steerable_actor() {
                    self.drag.mouse_button(actor, button, state);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(actor) = self.game.steerable_actor() {
                    self.drag.mouse_wheel(actor, delta);
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
    let config = AppConfig::load_and_init_logging();
    log::info!("Starting Space Rocks");
    InputMapper::log_bindings("Space Rocks", BINDINGS);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
