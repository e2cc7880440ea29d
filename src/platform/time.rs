//! Frame timing: fixed-step accumulator and FPS tracking

use std::time::Instant;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta fed to the accumulator (seconds)
const MAX_FRAME_DT: f32 = 0.1;
/// Frames averaged by the FPS counter
const FPS_WINDOW: usize = 60;

/// Converts variable frame deltas into whole simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Add a frame delta and return how many ticks to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop backlog the substep cap could not absorb
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}

/// Rolling frames-per-second over the last `FPS_WINDOW` frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [Option<Instant>; FPS_WINDOW],
    frame_index: usize,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
            fps: 0.0,
        }
    }
}

impl FpsCounter {
    pub fn record(&mut self, now: Instant) {
        // The slot about to be overwritten holds the oldest frame
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        if let Some(oldest) = oldest {
            let elapsed = now.duration_since(oldest).as_secs_f32();
            if elapsed > 0.0 {
                self.fps = FPS_WINDOW as f32 / elapsed;
            }
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_whole_ticks_only() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(SIM_DT * 0.5), 0);
        assert_eq!(step.advance(SIM_DT * 0.6), 1);
        assert_eq!(step.advance(SIM_DT * 2.0), 2);
    }

    #[test]
    fn test_substep_cap() {
        let mut step = FixedStep::default();
        // A long stall is clamped and capped
        assert_eq!(step.advance(5.0), MAX_SUBSTEPS);
        assert!(step.advance(0.0) <= 1);
        assert_eq!(step.advance(0.0), 0);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(-1.0), 0);
        assert_eq!(step.advance(SIM_DT * 1.01), 1);
    }

    #[test]
    fn test_fps_needs_full_window() {
        let mut fps = FpsCounter::default();
        let start = Instant::now();
        for i in 0..FPS_WINDOW {
            fps.record(start + Duration::from_millis(i as u64 * 20));
        }
        assert_eq!(fps.fps(), 0.0);

        // 60 frames spanning 1.2 s
        fps.record(start + Duration::from_millis(FPS_WINDOW as u64 * 20));
        assert!((fps.fps() - 50.0).abs() < 0.01);
    }
}
