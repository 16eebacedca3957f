//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SR_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use spacerocks_math::{Vec2, Vec3};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    /// Particle fountain demo
    #[serde(default)]
    pub particles: ParticlesConfig,
    /// Cannon demo
    #[serde(default)]
    pub ballistics: BallisticsConfig,
    /// Asteroid game
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub rendering: RenderingConfig,
    #[serde(default)]
    pub debug: DebugConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SR_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SR_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("SR_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Load configuration and start logging at its level
    ///
    /// A config that fails to load is replaced by defaults, with a warning
    /// once the logger is up.
    pub fn load_and_init_logging() -> Self {
        match Self::load() {
            Ok(config) => {
                init_logging(&config.debug);
                config
            }
            Err(e) => {
                let config = Self::default();
                init_logging(&config.debug);
                log::warn!("Failed to load config: {}. Using defaults.", e);
                config
            }
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Space Rocks".to_string(),
            width: 600,
            height: 600,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Particle fountain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    /// Maximum number of live particles
    pub capacity: usize,
    /// Downward acceleration on the direction vector
    pub gravity: f32,
    /// Ground height
    pub ground: f32,
    /// Vertical velocity kept after bouncing off a cylinder
    pub bounce_damping: f32,
    /// Height particles launch from
    pub emitter_height: f32,
    /// Random seed for the emitter
    pub seed: u64,
    /// Camera eye [x, y, z]
    pub camera_eye: [f32; 3],
    /// Camera target [x, y, z]
    pub camera_target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            capacity: spacerocks_physics::particles::DEFAULT_CAPACITY,
            gravity: 1.0,
            ground: 0.0,
            bounce_damping: 0.5,
            emitter_height: 0.6,
            seed: 0,
            camera_eye: [0.0, 1.2, 4.0],
            camera_target: [0.0, 0.2, 0.0],
            fov: 30.0,
        }
    }
}

impl ParticlesConfig {
    /// Convert to the simulation's particle configuration
    pub fn to_particle_config(&self) -> spacerocks_physics::ParticleConfig {
        spacerocks_physics::ParticleConfig {
            capacity: self.capacity,
            gravity: self.gravity,
            ground: self.ground,
            bounce_damping: self.bounce_damping,
        }
    }
}

/// Cannon demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallisticsConfig {
    /// Projectile speed
    pub speed: f32,
    /// Projectile gravity
    pub gravity: f32,
    /// Fraction of velocity lost per second
    pub drag: f32,
    /// Seconds between samples of the predicted arc
    pub arc_step: f32,
    /// Degrees of aim change per arrow-key step
    pub aim_step: f32,
    /// Camera eye [x, y, z] (Z is up)
    pub camera_eye: [f32; 3],
    /// Camera target [x, y, z]
    pub camera_target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for BallisticsConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            gravity: 0.5,
            drag: 0.0,
            arc_step: 0.02,
            aim_step: 1.0,
            camera_eye: [2.5, -3.0, 1.5],
            camera_target: [0.0, 1.5, 0.3],
            fov: 40.0,
        }
    }
}

impl BallisticsConfig {
    /// Projectile template for firing and arc prediction
    pub fn to_projectile(&self) -> spacerocks_physics::Projectile {
        spacerocks_physics::Projectile::new(self.speed, self.gravity, self.drag)
    }
}

/// Asteroid game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed simulation rate in ticks per second
    pub tick_rate: u32,
    /// Seconds an arrow key is held before it repeats
    pub key_repeat_delay: f32,
    /// Ship movement per arrow-key step
    pub actor_step: f32,
    /// Ship half-extent
    pub actor_scale: f32,
    /// Ship start position [x, y]
    pub actor_start: [f32; 2],
    pub lives: u32,
    /// Asteroid speed range [min, max] per tick
    pub asteroid_speed: [f32; 2],
    pub asteroid_scale: f32,
    /// Ticks between asteroid spawns
    pub asteroid_spawn_interval: u32,
    pub max_asteroids: usize,
    /// Constant downward pull per tick
    pub drift: f32,
    /// Distance past the frame edge before an asteroid counts as dodged
    pub asteroid_margin: f32,
    /// Random seed; unset seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let core = spacerocks_core::GameConfig::default();
        Self {
            tick_rate: 60,
            key_repeat_delay: spacerocks_input::DEFAULT_REPEAT_DELAY,
            actor_step: core.actor_step,
            actor_scale: core.actor_scale,
            actor_start: core.actor_start.to_array(),
            lives: core.lives,
            asteroid_speed: [core.asteroid_speed.0, core.asteroid_speed.1],
            asteroid_scale: core.asteroid_scale,
            asteroid_spawn_interval: core.asteroid_spawn_interval,
            max_asteroids: core.max_asteroids,
            drift: core.drift,
            asteroid_margin: core.asteroid_margin,
            seed: core.seed,
        }
    }
}

impl GameConfig {
    /// Convert to the game's configuration
    pub fn to_game_config(&self) -> spacerocks_core::GameConfig {
        spacerocks_core::GameConfig {
            actor_step: self.actor_step,
            actor_scale: self.actor_scale,
            actor_start: Vec2::from(self.actor_start),
            lives: self.lives,
            asteroid_speed: (self.asteroid_speed[0], self.asteroid_speed[1]),
            asteroid_scale: self.asteroid_scale,
            asteroid_spawn_interval: self.asteroid_spawn_interval,
            max_asteroids: self.max_asteroids,
            drift: self.drift,
            asteroid_margin: self.asteroid_margin,
            seed: self.seed,
        }
    }

    /// Seconds per simulation tick
    pub fn tick_duration(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    pub actor_color: [f32; 4],
    pub planet_color: [f32; 4],
    pub asteroid_color: [f32; 4],
    /// Hover highlight color
    pub outline_color: [f32; 4],
    /// Hover highlight thickness in world units
    pub outline_width: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.02, 0.02, 0.08, 1.0],
            actor_color: [0.85, 0.85, 0.9, 1.0],
            planet_color: [0.2, 0.45, 0.9, 1.0],
            asteroid_color: [0.55, 0.45, 0.35, 1.0],
            outline_color: [1.0, 1.0, 0.0, 1.0],
            outline_width: 0.01,
        }
    }
}

impl RenderingConfig {
    pub fn clear_color(&self) -> wgpu::Color {
        let bg = &self.background_color;
        wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` takes precedence
    pub log_level: String,
    /// Draw each planet's gravity reach
    pub show_gravity_reach: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_gravity_reach: true,
        }
    }
}

/// World layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to the RON world layout
    pub layout_path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            layout_path: "scenes/space_rocks.ron".to_string(),
        }
    }
}

/// Convert a `[x, y, z]` config triple
pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from(v)
}

/// Initialize logging: `RUST_LOG` if set, otherwise the configured level
pub fn init_logging(debug: &DebugConfig) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(debug.log_level.as_str()))
        .init();
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 600);
        assert_eq!(config.game.lives, 3);
        assert_eq!(config.game.actor_step, 0.005);
        assert_eq!(config.scene.layout_path, "scenes/space_rocks.ron");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("asteroid_spawn_interval"));
        assert!(toml.contains("bounce_damping"));
    }

    #[test]
    fn test_game_config_round_trips_core_defaults() {
        let game = GameConfig::default().to_game_config();
        assert_eq!(game, spacerocks_core::GameConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[game]\nlives = 5\n").unwrap();
        assert_eq!(config.game.lives, 5);
        assert_eq!(config.game.tick_rate, 60);
        assert_eq!(config.window.title, "Space Rocks");
    }

    #[test]
    fn test_particle_conversion() {
        let particles = ParticlesConfig {
            capacity: 10,
            ..Default::default()
        };
        let config = particles.to_particle_config();
        assert_eq!(config.capacity, 10);
        assert_eq!(config.bounce_damping, 0.5);
    }

    #[test]
    fn test_tick_duration() {
        let game = GameConfig {
            tick_rate: 50,
            ..Default::default()
        };
        assert!((game.tick_duration() - 0.02).abs() < 1e-6);
    }
}
