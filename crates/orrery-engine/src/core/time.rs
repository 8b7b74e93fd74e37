/// Frame clock driven by host frame deltas.
/// Tracks total elapsed seconds and the delta of the latest frame.
/// Elapsed time is kept in f64: after a few days an f32 total can no longer
/// absorb a 1/60 s frame.
pub struct FrameClock {
    /// Total elapsed time in seconds.
    elapsed: f64,
    /// Delta of the most recent tick.
    delta: f32,
    /// Largest delta accepted for a single frame.
    max_delta: f32,
}

impl FrameClock {
    /// Default cap for one frame (a backgrounded tab can report seconds).
    pub const DEFAULT_MAX_DELTA: f32 = 0.25;

    pub fn new() -> Self {
        Self::with_max_delta(Self::DEFAULT_MAX_DELTA)
    }

    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            max_delta,
        }
    }

    /// Advance by a host frame delta. Returns the accepted delta.
    /// Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, self.max_delta) } else { 0.0 };
        self.elapsed += f64::from(dt);
        self.delta = dt;
        dt
    }

    /// Total elapsed seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Delta of the most recent tick.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.delta = 0.0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
