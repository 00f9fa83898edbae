//! Frame counter shown in the title bar
//!
//! Frames are counted continuously; the displayed rate is recomputed once
//! per refresh interval so the number is readable instead of flickering.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FrameCounter {
    interval: Duration,
    window_start: Instant,
    frames: u32,
    fps: Option<f32>,
}

impl FrameCounter {
    pub fn new(refresh_interval_secs: f32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f32(refresh_interval_secs.max(0.1)),
            window_start: now,
            frames: 0,
            fps: None,
        }
    }

    /// Count one rendered frame
    pub fn frame(&mut self, now: Instant) {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= self.interval {
            self.fps = Some(self.frames as f32 / elapsed.as_secs_f32());
            self.frames = 0;
            self.window_start = now;
        }
    }

    /// Rate measured over the last completed window
    #[cfg(test)]
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }

    pub fn label(&self) -> String {
        match self.fps {
            Some(fps) => format!("{:.0} FPS", fps),
            None => "-- FPS".to_string(),
        }
    }
}
