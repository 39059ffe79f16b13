//! Wall-clock to simulation-time conversion
//!
//! Display callbacks arrive at whatever rate the host runs at. The clock turns
//! the gap between two callbacks into a time factor (1.0 = one ideal frame),
//! capped so a stalled tab does not teleport everything on resume.

/// Converts callback timestamps into a capped time factor
#[derive(Debug, Clone)]
pub struct SimClock {
    last_ms: Option<f64>,
    ideal_frame_ms: f32,
    max_factor: f32,
}

impl SimClock {
    pub fn new(ideal_frame_ms: f32, max_factor: f32) -> Self {
        Self {
            last_ms: None,
            ideal_frame_ms,
            max_factor,
        }
    }

    /// Record `now_ms` and return the time factor since the previous call
    ///
    /// The first call yields 0. A timestamp older than the previous one
    /// yields 0 rather than a negative factor.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        time_factor(delta as f32, self.ideal_frame_ms, self.max_factor)
    }

    /// Forget the previous timestamp
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// `min(delta / ideal, cap)`
#[inline]
pub fn time_factor(delta_ms: f32, ideal_frame_ms: f32, max_factor: f32) -> f32 {
    (delta_ms / ideal_frame_ms).clamp(0.0, max_factor)
}
