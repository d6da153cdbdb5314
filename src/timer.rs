//! Frame timing: turns `requestAnimationFrame` timestamps into a speed multiplier.

/// Frame time of the 60 Hz reference, in milliseconds.
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Longest delta a single frame may contribute (tab-switch stalls).
pub const MAX_FRAME_MS: f64 = 100.0;

/// One frame's worth of timing information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Host timestamp of this frame in milliseconds.
    pub now_ms: f64,
    /// Dimensionless speed multiplier, 1.0 at exactly 60 Hz.
    pub dt: f64,
    /// Seconds since the very first tick.
    pub elapsed_secs: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_ms: Option<f64>,
    origin_ms: Option<f64>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp so the next tick contributes zero motion.
    /// Elapsed time keeps counting from the original start.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    pub fn tick(&mut self, now_ms: f64) -> Tick {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let delta = match self.last_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        Tick {
            now_ms,
            dt: delta / REFERENCE_FRAME_MS,
            elapsed_secs: (now_ms - origin).max(0.0) / 1000.0,
        }
    }
}
