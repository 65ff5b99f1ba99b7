//! Frame clock
//!
//! Turns display-refresh timestamps into the delta one simulation step consumes.

use crate::consts::FIRST_FRAME_DT;

/// Delta-time in seconds between two millisecond timestamps, clamped to `max_dt`
#[inline]
pub fn frame_delta(prev_ms: f64, now_ms: f64, max_dt: f32) -> f32 {
    (((now_ms - prev_ms) / 1000.0) as f32).min(max_dt)
}

/// Remembers the previous frame timestamp for [`frame_delta`]
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Advance to `now_ms` and return the step delta
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(prev) => frame_delta(prev, now_ms, self.max_dt),
            None => FIRST_FRAME_DT.min(self.max_dt),
        };
        self.last_ms = Some(now_ms);
        dt
    }
}
