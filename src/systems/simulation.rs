//! Simulation timing
//!
//! Turns wall-clock frames into:
//! - A capped delta time for the continuous demos
//! - A clock in seconds since start, for emitters and key repeat
//! - A number of fixed ticks for the game, via an accumulator

use std::time::Instant;

/// Longest frame the simulation will catch up on
const MAX_FRAME_TIME: f32 = 0.25;

/// Timing for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame, capped
    pub dt: f32,
    /// Seconds since the system was created
    pub now: f32,
    /// Fixed ticks to run this frame
    pub ticks: u32,
}

/// Manages the simulation clock
pub struct SimulationSystem {
    start: Instant,
    last_frame: Instant,
    tick_duration: f32,
    accumulator: f32,
}

impl SimulationSystem {
    /// Create a simulation clock running `tick_rate` fixed ticks per second
    pub fn new(tick_rate: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            tick_duration: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Advance the clock to the current instant
    pub fn frame(&mut self) -> FrameTime {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        let (dt, ticks) = self.advance(raw_dt);
        FrameTime {
            dt,
            now: (now - self.start).as_secs_f32(),
            ticks,
        }
    }

    /// Seconds since the system was created
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Seconds per fixed tick
    pub fn tick_duration(&self) -> f32 {
        self.tick_duration
    }

    /// Cap `raw_dt` and count the whole ticks it completes
    ///
    /// The remainder carries over to the next frame.
    fn advance(&mut self, raw_dt: f32) -> (f32, u32) {
        // Cap dt to prevent spiral of death on first frame or after window focus
        let dt = raw_dt.clamp(0.0, MAX_FRAME_TIME);
        self.accumulator += dt;
        let mut ticks = 0;
        while self.accumulator >= self.tick_duration {
            self.accumulator -= self.tick_duration;
            ticks += 1;
        }
        (dt, ticks)
    }

    /// Drop any partial tick, e.g. after a restart
    pub fn reset_accumulator(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_accumulate_across_frames() {
        let mut sim = SimulationSystem::new(10);
        assert_eq!(sim.advance(0.05).1, 0);
        assert_eq!(sim.advance(0.06).1, 1);
        assert_eq!(sim.advance(0.2).1, 2);
    }

    #[test]
    fn test_delta_time_capped() {
        let mut sim = SimulationSystem::new(60);
        let (dt, ticks) = sim.advance(3.0);
        assert_eq!(dt, MAX_FRAME_TIME);
        // 0.25s at 60 Hz
        assert_eq!(ticks, 15);
    }

    #[test]
    fn test_reset_accumulator() {
        let mut sim = SimulationSystem::new(10);
        sim.advance(0.09);
        sim.reset_accumulator();
        assert_eq!(sim.advance(0.02).1, 0);
    }

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert!((sim.tick_duration() - 1.0 / 60.0).abs() < 1e-6);
        assert!(sim.elapsed() < 1.0);
    }
}
