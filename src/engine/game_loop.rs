/// Frame timing for the character simulation
///
/// Wall-clock frame time is accumulated and drained in fixed steps so the
/// state machine, character motion and animation mixer always advance by the
/// same delta regardless of the display rate. A time scale slows the whole
/// simulation down, which makes cross-fades easy to inspect.
use std::time::{Duration, Instant};

/// Default simulation step (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Upper bound on steps per frame; a longer stall drops the backlog instead
/// of fast-forwarding the character
pub const MAX_STEPS_PER_FRAME: u32 = 5;

/// Slowest and fastest supported simulation speed
const TIME_SCALE_RANGE: (f32, f32) = (0.05, 4.0);

#[derive(Debug)]
pub struct GameLoop {
    /// Simulation step in seconds
    timestep: f32,
    /// Multiplier applied to wall-clock time before it is accumulated
    time_scale: f32,
    /// Scaled time not yet consumed by steps (seconds)
    accumulator: f32,
    last_frame: Instant,
    paused: bool,

    frame_count: u64,
    step_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::with_timestep(FIXED_TIMESTEP)
    }

    /// Create a loop stepping by `timestep` seconds (non-positive values fall back to the default)
    pub fn with_timestep(timestep: f32) -> Self {
        let timestep = if timestep > 0.0 && timestep.is_finite() {
            timestep
        } else {
            FIXED_TIMESTEP
        };

        Self {
            timestep,
            time_scale: 1.0,
            accumulator: 0.0,
            last_frame: Instant::now(),
            paused: false,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Measure the wall-clock time since the previous frame and return the steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of wall-clock time, returning the steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time.as_secs_f32() * self.time_scale;

        let mut steps = 0;
        while self.accumulator >= self.timestep && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= self.timestep;
            steps += 1;
        }

        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= self.timestep {
            log::debug!(
                "Dropping {:.3}s of simulation backlog",
                self.accumulator - self.timestep
            );
            self.accumulator = self.accumulator.min(self.timestep);
        }

        self.step_count += u64::from(steps);
        steps
    }

    /// Step length in seconds, the `dt` every update receives
    pub fn fixed_timestep(&self) -> f32 {
        self.timestep
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the simulation speed, clamped to a sane range
    pub fn set_time_scale(&mut self, scale: f32) {
        let (min, max) = TIME_SCALE_RANGE;
        self.time_scale = if scale.is_finite() {
            scale.clamp(min, max)
        } else {
            1.0
        };
        log::info!("Simulation speed set to {:.2}x", self.time_scale);
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume without replaying the time spent paused
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.accumulator = 0.0;
            self.last_frame = Instant::now();
            log::info!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
