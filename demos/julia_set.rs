//! Julia Set
//!
//! The escape-time fractal for `z = z^2 + c`, computed per pixel in the
//! fragment shader. Hold the left button and move the mouse to pick `c`.
//!
//! Run with: cargo run --example julia_set

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use spacerocks::config::{AppConfig, WindowConfig};
use spacerocks::input::{InputAction, InputMapper};
use spacerocks::systems::{RenderSystem, WindowSystem};
use spacerocks_render::{JuliaSet, JuliaSetPipeline};

const BINDINGS: &[(&str, &str)] = &[
    ("Left drag", "choose c"),
    ("R", "reset c"),
    ("F11", "toggle fullscreen"),
    ("Esc", "quit"),
];

struct JuliaApp {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    pipeline: Option<JuliaSetPipeline>,
    julia: JuliaSet,
    picking: bool,
    status: String,
}

impl JuliaApp {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            render: None,
            pipeline: None,
            julia: JuliaSet::default(),
            picking: false,
            status: String::new(),
        }
    }

    fn update_title(&mut self) {
        let status = format!("c = {:.3} {:+.3}i", self.julia.c[0], self.julia.c[1]);
        if status != self.status {
            if let Some(window) = &self.window {
                window.update_title(&status);
            }
            self.status = status;
        }
    }
}

impl ApplicationHandler for JuliaApp {
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
                self.pipeline = Some(JuliaSetPipeline::julia_set(context, context.config.format));
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
                    Some(InputAction::Restart) => self.julia = JuliaSet::default(),
                    Some(InputAction::ToggleFullscreen) => {
                        if let Some(window) = &self.window {
                            window.toggle_fullscreen();
                        }
                    }
                    Some(InputAction::Fire) | None => {}
                }
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.picking = state == ElementState::Pressed;
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some(render)) = (self.picking, &self.render) {
                    let (width, height) = render.size();
                    self.julia.set_from_cursor(position.x, position.y, width, height);
                }
            }

            WindowEvent::Focused(false) => self.picking = false,

            WindowEvent::RedrawRequested => {
                self.update_title();

                if let (Some(render), Some(pipeline)) = (&mut self.render, &self.pipeline) {
                    let uniforms = self.julia.uniforms(render.viewport());
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
        config.window.title = "Julia Set".to_string();
    }
    log::info!("Starting Julia set");
    InputMapper::log_bindings("Julia Set", BINDINGS);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = JuliaApp::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
