//! Sprite animation
//!
//! Two keyframe sprites can be dragged and resized with the mouse. A third
//! sprite swings between them on a sine wave, blending position, size and
//! color, while a fourth one breathes in place.
//!
//! Run with: cargo run --example sprite_animation

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use spacerocks::config::{AppConfig, WindowConfig};
use spacerocks::input::{InputAction, InputMapper};
use spacerocks::systems::{RenderSystem, SimulationSystem, WindowSystem};
use spacerocks_core::{Breath, Lerper, Sprite};
use spacerocks_input::SpriteDragController;
use spacerocks_math::{lerp, Vec2};
use spacerocks_render::{Camera2D, ShapeBatch};

const BINDINGS: &[(&str, &str)] = &[
    ("Left drag", "move a keyframe sprite"),
    ("Wheel", "resize the sprite under the mouse"),
    ("R", "reset the sprites"),
    ("F11", "toggle fullscreen"),
    ("Esc", "quit"),
];

const KEYFRAME_COLORS: [[f32; 4]; 2] = [[0.9, 0.5, 0.2, 1.0], [0.2, 0.6, 0.9, 1.0]];
const BREATH_COLOR: [f32; 4] = [0.4, 0.85, 0.4, 1.0];
const BREATH_BASE: Vec2 = Vec2::new(0.2, 0.2);

fn keyframes() -> [Sprite; 2] {
    [
        Sprite::new(Vec2::new(-0.5, -0.5), Vec2::splat(0.3)),
        Sprite::new(Vec2::new(0.5, 0.5), Vec2::splat(0.3)),
    ]
}

struct SpriteApp {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    simulation: SimulationSystem,
    drag: SpriteDragController,
    camera: Camera2D,
    batch: ShapeBatch,
    keyframes: [Sprite; 2],
    lerper: Lerper,
    breather: Sprite,
    breath: Breath,
    /// Keyframe under the mouse
    hovered: Option<usize>,
    /// Keyframe being dragged
    picked: Option<usize>,
    sim_time: f32,
}

impl SpriteApp {
    fn new(config: AppConfig) -> Self {
        Self {
            window: None,
            render: None,
            simulation: SimulationSystem::default(),
            drag: SpriteDragController::new(config.window.width, config.window.height),
            camera: Camera2D::new(),
            batch: ShapeBatch::new(),
            keyframes: keyframes(),
            lerper: Lerper::default(),
            breather: Sprite::new(Vec2::new(-0.6, 0.6), BREATH_BASE),
            breath: Breath::default(),
            hovered: None,
            picked: None,
            sim_time: 0.0,
            config,
        }
    }

    fn reset(&mut self) {
        self.keyframes = keyframes();
        self.picked = None;
        self.sim_time = 0.0;
    }

    fn build_batch(&mut self) {
        self.batch.clear();

        let t = self.lerper.t(self.sim_time);
        let [from, to] = &self.keyframes;
        let between = Lerper::between(from, to, t);
        let [a, b] = KEYFRAME_COLORS;
        let color = [
            lerp(a[0], b[0], t),
            lerp(a[1], b[1], t),
            lerp(a[2], b[2], t),
            1.0,
        ];

        for (sprite, color) in self.keyframes.iter().zip(KEYFRAME_COLORS) {
            self.batch.sprite(sprite, [color[0], color[1], color[2], 0.5]);
        }
        self.batch.sprite(&between, color);
        self.batch.sprite(&self.breather, BREATH_COLOR);

        if let Some(i) = self.picked.or(self.hovered) {
            let colors = &self.config.rendering;
            self.batch
                .sprite_outline(&self.keyframes[i], colors.outline_width, colors.outline_color);
        }
    }
}

impl ApplicationHandler for SpriteApp {
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
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize(size.width, size.height);
                }
                self.drag.resize(size.width, size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match InputMapper::map_keyboard(key, event.state) {
                    Some(InputAction::Exit) => event_loop.exit(),
                    Some(InputAction::Restart) => self.reset(),
                    Some(InputAction::ToggleFullscreen) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    Some(InputAction::Fire) | None => {}
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let cursor = self.drag.to_world(position.x, position.y);
                let under = self
                    .keyframes
                    .iter()
                    .rposition(|s| s.hit(cursor.x, cursor.y));
                // With nothing under the mouse the first sprite still gets the
                // move, which only tracks the cursor
                let i = self.picked.or(under).unwrap_or(0);
                let over = self.drag.cursor_moved(&mut self.keyframes[i], position);
                self.hovered = if over { Some(i) } else { None };
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                ElementState::Pressed => {
                    self.picked = self.hovered;
                    if let Some(i) = self.picked {
                        self.drag.mouse_button(&mut self.keyframes[i], MouseButton::Left, state);
                    }
                }
                ElementState::Released => {
                    if let Some(i) = self.picked.take() {
                        self.drag.mouse_button(&mut self.keyframes[i], MouseButton::Left, state);
                    }
                }
            },

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(i) = self.picked.or(self.hovered) {
                    self.drag.mouse_wheel(&mut self.keyframes[i], delta);
                }
            }

            WindowEvent::RedrawRequested => {
                self.sim_time += self.simulation.frame().dt;
                self.breath.apply(&mut self.breather, BREATH_BASE, self.sim_time);
                self.build_batch();

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
        config.window.title = "Sprite Animation".to_string();
    }
    log::info!("Starting sprite animation");
    InputMapper::log_bindings("Sprite Animation", BINDINGS);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = SpriteApp::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
