//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Fixed-timestep accumulator for deterministic physics stepping
///
/// Converts variable frame deltas into a whole number of fixed steps,
/// carrying the remainder forward.
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    /// Upper bound on accumulated time, to avoid a spiral of death after a
    /// long stall
    max_accumulated: f32,
}

impl FixedStep {
    /// Create an accumulator producing steps of `step` seconds
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_accumulated: step * 8.0,
        }
    }

    /// Feed a frame delta and return how many fixed steps to run
    pub fn advance(&mut self, delta_time: f32) -> u32 {
        self.accumulator = (self.accumulator + delta_time).min(self.max_accumulated);
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// The fixed step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }
}
