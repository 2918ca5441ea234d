//! Fixed timestep driver
//!
//! Converts variable frame deltas from the host's frame callback into a whole
//! number of simulation ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
    max_frame_dt: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS, MAX_FRAME_DT)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32, max_frame_dt: f32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
            max_frame_dt,
        }
    }

    /// Add a frame's elapsed seconds; returns how many ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = frame_dt.clamp(0.0, self.max_frame_dt);
        self.accumulator += frame_dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Drop backlog we could not catch up on
        if self.accumulator >= self.step {
            self.accumulator %= self.step;
        }
        steps
    }

    /// Fraction of a tick left in the accumulator (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
