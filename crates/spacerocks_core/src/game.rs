//! The SpaceRocks game
//!
//! The player flies a ship through a grid of frames. Planets in the current
//! frame pull the ship toward them (plus a constant downward drift), the ship
//! can land on a planet, and asteroids spawn on the frame border and fly
//! straight at where the ship was when they spawned. Dodged asteroids score a
//! point; each hit costs a life.
//!
//! The game advances in fixed ticks; all speeds are per tick.

use rand::rngs::StdRng;
use rand::SeedableRng;
use slotmap::SlotMap;

use spacerocks_math::Vec2;
use spacerocks_physics::{Asteroid, AsteroidKey, FrameCoord, FrameEdges, WorldMap};

use crate::Sprite;

/// Distance past a planet's surface at which a landed ship takes off again
const TAKEOFF_SLACK: f32 = 0.001;

/// Game tuning
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Distance the ship moves per arrow-key step
    pub actor_step: f32,
    /// Half-extent of the ship sprite
    pub actor_scale: f32,
    /// Where the ship starts in the start frame
    pub actor_start: Vec2,
    pub lives: u32,
    /// Asteroid speed range (min, max) per tick
    pub asteroid_speed: (f32, f32),
    /// Asteroid radius
    pub asteroid_scale: f32,
    /// Ticks between asteroid spawns
    pub asteroid_spawn_interval: u32,
    /// No spawning while this many asteroids are alive
    pub max_asteroids: usize,
    /// Constant downward pull per tick
    pub drift: f32,
    /// How far past the frame an asteroid may go before it counts as dodged
    pub asteroid_margin: f32,
    /// RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            actor_step: 0.005,
            actor_scale: 0.15,
            actor_start: Vec2::ZERO,
            lives: 3,
            asteroid_speed: (0.004, 0.01),
            asteroid_scale: 0.05,
            asteroid_spawn_interval: 90,
            max_asteroids: 5,
            drift: 0.0005,
            asteroid_margin: 0.2,
            seed: None,
        }
    }
}

/// Whether the game is running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Something notable that happened during a tick
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// The ship touched down on planet `planet` of the current frame
    Landed { planet: usize },
    /// The ship left one frame for another
    FrameChanged { from: FrameCoord, to: FrameCoord },
    AsteroidSpawned(AsteroidKey),
    /// An asteroid left the frame without hitting the ship
    Dodged(AsteroidKey),
    /// An asteroid hit the ship
    ActorHit { lives: u32 },
    GameOver { score: u32 },
}

/// The asteroid game
pub struct SpaceRocks {
    config: GameConfig,
    actor: Sprite,
    world: WorldMap,
    asteroids: SlotMap<AsteroidKey, Asteroid>,
    rng: StdRng,
    state: GameState,
    lives: u32,
    score: u32,
    /// Index of the planet the ship rests on, in the current frame
    landed: Option<usize>,
    ticks: u64,
    ticks_since_spawn: u32,
}

impl SpaceRocks {
    /// Start a game in `world`
    pub fn new(config: GameConfig, world: WorldMap) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let actor = Sprite::new(config.actor_start, Vec2::splat(config.actor_scale));
        let lives = config.lives;

        Self {
            config,
            actor,
            world,
            asteroids: SlotMap::with_key(),
            rng,
            state: GameState::Playing,
            lives,
            score: 0,
            landed: None,
            ticks: 0,
            ticks_since_spawn: 0,
        }
    }

    /// Start a game in the built-in world
    pub fn with_default_world(config: GameConfig) -> Self {
        Self::new(config, WorldMap::default_layout())
    }

    /// Begin again from the start frame with full lives
    pub fn restart(&mut self) {
        self.state = GameState::Playing;
        self.lives = self.config.lives;
        self.score = 0;
        self.asteroids.clear();
        self.world.reset();
        self.actor.set_position(self.config.actor_start);
        self.actor.set_scale(Vec2::splat(self.config.actor_scale));
        self.landed = None;
        self.ticks = 0;
        self.ticks_since_spawn = 0;
        log::info!("Game restarted in frame {}", self.world.current());
    }

    /// Move the ship by `(dx, dy)`
    ///
    /// Frame changes and landing are resolved on the next tick.
    pub fn move_actor(&mut self, dx: f32, dy: f32) {
        if self.state == GameState::Playing {
            self.actor.set_position(self.actor.position + Vec2::new(dx, dy));
        }
    }

    /// Move the ship one step in a direction such as `(-1, 0)`
    pub fn step_actor(&mut self, direction: (f32, f32)) {
        let step = self.config.actor_step;
        self.move_actor(direction.0 * step, direction.1 * step);
    }

    /// Add an asteroid to the current frame
    pub fn add_asteroid(&mut self, asteroid: Asteroid) -> AsteroidKey {
        self.asteroids.insert(asteroid)
    }

    /// Advance the game one tick
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state == GameState::GameOver {
            return events;
        }
        self.ticks += 1;

        self.apply_gravity();
        self.resolve_landing(&mut events);
        self.wrap_actor(&mut events);
        self.spawn_asteroids(&mut events);
        self.update_asteroids(&mut events);

        events
    }

    fn apply_gravity(&mut self) {
        if self.landed.is_some() {
            return;
        }
        let position = self.actor.position;
        let pull = self.world.current_frame().gravity_at(position) + Vec2::new(0.0, -self.config.drift);
        self.actor.set_position(position + pull);
    }

    fn resolve_landing(&mut self, events: &mut Vec<GameEvent>) {
        let frame = self.world.current_frame();
        let position = self.actor.position;

        if let Some(index) = frame.planet_at(position) {
            let planet = &frame.planets()[index];
            self.actor.set_position(planet.surface_point(position));
            if self.landed != Some(index) {
                self.landed = Some(index);
                log::debug!("Landed on planet {} in frame {}", index, self.world.current());
                events.push(GameEvent::Landed { planet: index });
            }
        } else if let Some(index) = self.landed {
            let still_down = frame.planets().get(index).is_some_and(|planet| {
                position.distance(planet.position) <= planet.radius() + TAKEOFF_SLACK
            });
            if !still_down {
                self.landed = None;
            }
        }
    }

    fn wrap_actor(&mut self, events: &mut Vec<GameEvent>) {
        let from = self.world.current();
        let before = self.actor.position;
        let (position, crossed) = self.world.wrap(before);
        self.actor.set_position(position);

        if !crossed.is_empty() {
            // A drag in progress continues from the new frame's side
            let mut shift = Vec2::ZERO;
            if crossed.intersects(FrameEdges::LEFT | FrameEdges::RIGHT) {
                shift.x = position.x - before.x;
            }
            if crossed.intersects(FrameEdges::TOP | FrameEdges::BOTTOM) {
                shift.y = position.y - before.y;
            }
            self.actor.old_position += shift;

            // Asteroids live in frame-local coordinates and stay behind
            self.asteroids.clear();
            self.landed = None;
            self.ticks_since_spawn = 0;
            events.push(GameEvent::FrameChanged {
                from,
                to: self.world.current(),
            });
        }
    }

    fn spawn_asteroids(&mut self, events: &mut Vec<GameEvent>) {
        self.ticks_since_spawn += 1;
        if self.ticks_since_spawn < self.config.asteroid_spawn_interval
            || self.asteroids.len() >= self.config.max_asteroids
        {
            return;
        }
        self.ticks_since_spawn = 0;

        let mut asteroid = Asteroid::spawn(
            &mut self.rng,
            self.config.asteroid_speed,
            self.config.asteroid_scale,
        );
        asteroid.aim_at(self.actor.position);
        let key = self.asteroids.insert(asteroid);
        events.push(GameEvent::AsteroidSpawned(key));
    }

    fn update_asteroids(&mut self, events: &mut Vec<GameEvent>) {
        let actor_center = self.actor.position;
        let actor_radius = self.actor_radius();
        let margin = self.config.asteroid_margin;

        let mut dodged = Vec::new();
        let mut hits = Vec::new();
        for (key, asteroid) in self.asteroids.iter_mut() {
            asteroid.advance();
            if asteroid.is_out_of_bounds(margin) {
                asteroid.set_alive(false);
                dodged.push(key);
            } else if asteroid.touches(actor_center, actor_radius) {
                asteroid.set_alive(false);
                hits.push(key);
            }
        }
        self.asteroids.retain(|_, a| a.is_alive());

        for key in dodged {
            self.score += 1;
            events.push(GameEvent::Dodged(key));
        }

        for _ in hits {
            if self.state == GameState::GameOver {
                break;
            }
            self.lives = self.lives.saturating_sub(1);
            log::info!("Ship hit, {} lives left", self.lives);
            events.push(GameEvent::ActorHit { lives: self.lives });

            if self.lives == 0 {
                self.state = GameState::GameOver;
                log::info!("Game over with score {}", self.score);
                events.push(GameEvent::GameOver { score: self.score });
            }
        }
    }

    /// Collision radius of the ship
    pub fn actor_radius(&self) -> f32 {
        self.actor.scale.x.min(self.actor.scale.y)
    }

    pub fn actor(&self) -> &Sprite {
        &self.actor
    }

    /// Mutable access for mouse dragging and wheel scaling
    /// The ship, while the player may still move it
    ///
    /// `None` once the game is over.
    pub fn steerable_actor(&mut self) -> Option<&mut Sprite> {
        match self.state {
            GameState::Playing => Some(&mut self.actor),
            GameState::GameOver => None,
        }
    }

    pub fn actor_mut(&mut self) -> &mut Sprite {
        &mut self.actor
    }

    pub fn world(&self) -> &WorldMap {
        &self.world
    }

    pub fn asteroids(&self) -> &SlotMap<AsteroidKey, Asteroid> {
        &self.asteroids
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Planet index the ship rests on, if any
    pub fn landed_on(&self) -> Option<usize> {
        self.landed
    }

    /// Ticks since the game (re)started
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacerocks_physics::{Planet, WorldFrame};

    fn quiet_config() -> GameConfig {
        GameConfig {
            drift: 0.0,
            max_asteroids: 0,
            seed: Some(1),
            ..Default::default()
        }
    }

    fn empty_world() -> WorldMap {
        WorldMap::new(1, 1, vec![WorldFrame::new()], FrameCoord::new(0, 0))
    }

    #[test]
    fn test_drift_pulls_actor_down() {
        let config = GameConfig {
            drift: 0.01,
            ..quiet_config()
        };
        let mut game = SpaceRocks::new(config, empty_world());
        game.tick();
        assert!((game.actor().position.y + 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_step_actor_uses_actor_step() {
        let mut game = SpaceRocks::new(quiet_config(), empty_world());
        game.step_actor((-1.0, 0.0));
        assert!((game.actor().position.x + 0.005).abs() < 1e-7);
    }

    #[test]
    fn test_landing_pushes_to_surface() {
        let frame = WorldFrame::new().with_planet(Planet::new(Vec2::ZERO, Vec2::splat(0.2)));
        let world = WorldMap::new(1, 1, vec![frame], FrameCoord::new(0, 0));
        let config = GameConfig {
            actor_start: Vec2::new(0.0, 0.15),
            ..quiet_config()
        };
        let mut game = SpaceRocks::new(config, world);

        let events = game.tick();
        assert!(events.contains(&GameEvent::Landed { planet: 0 }));
        assert!((game.actor().position.y - 0.2).abs() < 1e-5);
        assert_eq!(game.landed_on(), Some(0));

        // Staying put does not land again
        assert!(game.tick().is_empty());
        assert!((game.actor().position.y - 0.2).abs() < 1e-5);

        game.move_actor(0.0, 0.05);
        game.tick();
        assert_eq!(game.landed_on(), None);
    }

    #[test]
    fn test_dodged_asteroid_scores() {
        let mut game = SpaceRocks::new(quiet_config(), empty_world());
        let key = game.add_asteroid(Asteroid::new(Vec2::new(1.0, 0.9), 0.05, 0.1));

        let mut events = Vec::new();
        for _ in 0..5 {
            events.extend(game.tick());
        }
        assert!(events.contains(&GameEvent::Dodged(key)));
        assert_eq!(game.score(), 1);
        assert!(game.asteroids().is_empty());
    }

    #[test]
    fn test_hit_costs_a_life() {
        let mut game = SpaceRocks::new(quiet_config(), empty_world());
        let mut rock = Asteroid::new(Vec2::new(-0.5, 0.0), 0.05, 0.1);
        rock.aim_at(Vec2::ZERO);
        let key = game.add_asteroid(rock);

        let mut events = Vec::new();
        for _ in 0..5 {
            events.extend(game.tick());
        }
        assert!(events.contains(&GameEvent::ActorHit { lives: 2 }));
        assert_eq!(game.lives(), 2);
        assert!(!game.asteroids().contains_key(key));
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let config = GameConfig {
            lives: 1,
            ..quiet_config()
        };
        let mut game = SpaceRocks::new(config, empty_world());
        game.add_asteroid(Asteroid::new(Vec2::ZERO, 0.05, 0.0));

        let events = game.tick();
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));
        assert_eq!(game.state(), GameState::GameOver);

        let position = game.actor().position;
        game.move_actor(0.5, 0.5);
        assert!(game.tick().is_empty());
        assert_eq!(game.actor().position, position);

        game.restart();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.lives(), 1);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_spawn_respects_interval_and_cap() {
        let config = GameConfig {
            asteroid_spawn_interval: 10,
            max_asteroids: 2,
            // Too slow to reach the ship during the test
            asteroid_speed: (0.0, 0.0),
            ..quiet_config()
        };
        let mut game = SpaceRocks::new(config, empty_world());

        let spawned = |events: &[GameEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::AsteroidSpawned(_)))
                .count()
        };

        let mut total = 0;
        for tick in 1..=9 {
            total += spawned(&game.tick());
            assert_eq!(total, 0, "spawned early at tick {}", tick);
        }
        total += spawned(&game.tick());
        assert_eq!(total, 1);

        for _ in 0..50 {
            total += spawned(&game.tick());
        }
        assert_eq!(total, 2);
        assert_eq!(game.asteroids().len(), 2);
    }

    #[test]
    fn test_frame_change_clears_asteroids() {
        let mut game = SpaceRocks::with_default_world(quiet_config());
        game.add_asteroid(Asteroid::new(Vec2::new(-0.9, -0.9), 0.05, 0.0));
        game.actor_mut().set_position(Vec2::new(0.99, 0.0));
        game.move_actor(0.05, 0.0);

        let events = game.tick();
        assert!(events.contains(&GameEvent::FrameChanged {
            from: FrameCoord::new(1, 1),
            to: FrameCoord::new(2, 1),
        }));
        assert!(game.asteroids().is_empty());
        assert!(game.actor().position.x < -0.9);
    }

    #[test]
    fn test_drag_across_edge_changes_frame_once() {
        let world = WorldMap::new(3, 1, Vec::new(), FrameCoord::new(0, 0));
        let mut game = SpaceRocks::new(quiet_config(), world);
        game.actor_mut().down(0.0, 0.0);

        let mut changes = 0;
        for i in 0..4 {
            game.actor_mut().drag(1.02 + 0.001 * i as f32, 0.0);
            changes += game
                .tick()
                .iter()
                .filter(|e| matches!(e, GameEvent::FrameChanged { .. }))
                .count();
        }

        assert_eq!(changes, 1);
        assert_eq!(game.world().current(), FrameCoord::new(1, 0));
        assert!((game.actor().position.x + 0.977).abs() < 1e-4);
    }

    #[test]
    fn test_restart_restores_actor_scale() {
        let mut game = SpaceRocks::new(quiet_config(), empty_world());
        game.actor_mut().wheel(3.0);
        assert!(game.actor().scale.x > 0.15);

        game.restart();
        assert_eq!(game.actor().scale, Vec2::splat(0.15));
    }

    #[test]
    fn test_ship_not_steerable_after_game_over() {
        let config = GameConfig {
            lives: 1,
            ..quiet_config()
        };
        let mut game = SpaceRocks::new(config, empty_world());
        assert!(game.steerable_actor().is_some());

        game.add_asteroid(Asteroid::new(Vec2::ZERO, 0.05, 0.0));
        game.tick();
        assert_eq!(game.state(), GameState::GameOver);
        assert!(game.steerable_actor().is_none());

        game.restart();
        assert!(game.steerable_actor().is_some());
    }
}
