use std::time::{Duration, Instant};

/// Wall-clock driven progress in `[0, 1]`; nothing ticks in the background.
#[derive(Debug, Clone, Copy)]
pub struct AnimationTimer {
    started: Option<Instant>,
    duration: Duration,
}

impl AnimationTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            started: None,
            duration,
        }
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn progress(&self) -> f64 {
        self.progress_at(Instant::now())
    }

    /// A timer that was never started reads as finished.
    pub fn progress_at(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}
