//! Frame pacing.
//!
//! Converts real frame times into simulation steps. A frame that took longer
//! than the stall threshold is dropped once (loading hitches should not fling
//! ships across the system); large scaled deltas are split into equal
//! micro-steps no longer than the minimum stable step.

use crate::config::SimConfig;

/// What the stepper did with a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was treated as a stall and not simulated.
    Skipped,
    Stepped { steps: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStepper {
    min_step: f64,
    stall_threshold: f64,
    skipped: bool,
}

impl FrameStepper {
    pub fn new(min_step: f64, stall_threshold: f64) -> Self {
        Self {
            min_step,
            stall_threshold,
            skipped: false,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.min_stable_step, config.stall_threshold)
    }

    /// Runs the simulation steps for one real frame of `real_dt` seconds.
    ///
    /// `step` advances the simulation by the given amount and returns the time
    /// compression in effect afterwards, since a step may change it.
    pub fn advance(
        &mut self,
        real_dt: f64,
        compression: f64,
        mut step: impl FnMut(f64) -> f64,
    ) -> FrameOutcome {
        if real_dt > self.stall_threshold && !self.skipped {
            self.skipped = true;
            tracing::debug!(real_dt, "stalled frame skipped");
            return FrameOutcome::Skipped;
        }

        let game_dt = real_dt * compression;
        let mut steps = 0;
        if self.min_step > 0.0 && game_dt > self.min_step {
            let count = (game_dt / self.min_step).ceil();
            let micro = game_dt / count;
            let mut compression = compression;
            let mut elapsed = 0.0;
            for _ in 0..count as u32 {
                compression = step(micro);
                steps += 1;
                elapsed += micro;
                if elapsed > compression * real_dt {
                    break;
                }
            }
            tracing::trace!(game_dt, steps, "frame subdivided");
        } else {
            step(game_dt);
            steps = 1;
        }

        self.skipped = false;
        FrameOutcome::Stepped { steps }
    }
}

impl Default for FrameStepper {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}
