//! Fixed timestep frame driver
//!
//! Real frame deltas go into an accumulator; the scene steps in whole
//! `SIM_DT` slices, capped per frame so a stalled tab can't spiral.

use super::state::Scene;
use crate::consts::*;

/// Frame timing state for one mounted scene
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    /// Timestamp of the previous frame (ms), 0 before the first frame
    last_time: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame for a `requestAnimationFrame` timestamp
    pub fn delta(&mut self, time_ms: f64) -> f32 {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = time_ms;
        dt
    }

    /// Feed `dt` seconds and return how many fixed steps to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.frames += 1;
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Whatever is left past the cap is dropped, not banked
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Step the scene for one displayed frame; returns the number of substeps
pub fn tick(scene: &mut Scene, clock: &mut FrameClock, dt: f32) -> u32 {
    let steps = clock.advance(dt);
    for _ in 0..steps {
        scene.step();
    }
    steps
}
