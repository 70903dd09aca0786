//! Fixed timestep accumulator

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Turns variable frame times into whole simulation ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f64,
    step: f64,
    max_substeps: u32,
    max_frame_dt: f64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(step: f64) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Add a frame's elapsed time and return how many ticks to run now.
    /// Long frames are clamped and at most `MAX_SUBSTEPS` ticks are owed.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, self.max_frame_dt);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    /// Fraction of a tick left over after the last `advance`
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.step
    }

    /// Discard accumulated time (after a pause or focus loss)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks_only() {
        let mut clock = FixedStep::new(0.25);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.1), 1);
        assert!((clock.alpha() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FixedStep::new(SIM_DT);
        // 5 seconds of stall only counts as MAX_FRAME_DT
        assert_eq!(clock.advance(5.0), (MAX_FRAME_DT / SIM_DT) as u32);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut clock = FixedStep::new(0.001);
        assert_eq!(clock.advance(0.1), MAX_SUBSTEPS);
    }

    #[test]
    fn test_negative_frame_ignored() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(-1.0), 0);
        clock.reset();
        assert_eq!(clock.alpha(), 0.0);
    }
}
