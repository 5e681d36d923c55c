//! Per-refresh clock feeding `ExhibitEngine::tick`.

use web_time::{Duration, Instant};

/// Longest step handed to the engine in one tick. A stalled frame (window
/// drag, breakpoint) would otherwise finish every running animation at once.
const MAX_STEP: Duration = Duration::from_millis(250);

/// Measures elapsed time between display refreshes and keeps a smoothed FPS.
pub struct FrameClock {
    /// Timestamp of the previous tick.
    last_tick: Instant,
    /// Smoothed FPS using exponential moving average.
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0).
    smoothing: f32,
}

impl FrameClock {
    /// Start the clock now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Advance to the current instant and return the step since the last
    /// call, capped at 250 ms.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed.min(MAX_STEP)
    }

    /// Current smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
