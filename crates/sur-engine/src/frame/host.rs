use std::time::Duration;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// The host's frame-timing primitive.
///
/// Timestamps are measured from a host-chosen epoch and must not decrease
/// between calls (a decreasing one is treated as zero elapsed time).
pub trait FrameHost {
    /// Current host time; the baseline for the first frame delta.
    fn now(&mut self) -> Duration;

    /// Blocks until the next frame tick and returns its timestamp.
    fn next_frame(&mut self) -> Duration;
}

/// Native host pacing ticks to a fixed rate with `std::thread::sleep`.
///
/// A tick that arrives late does not cause catch-up bursts: the schedule
/// restarts from the late tick.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct IntervalHost {
    epoch: Instant,
    interval: Duration,
    deadline: Option<Instant>,
}

#[cfg(not(target_arch = "wasm32"))]
impl IntervalHost {
    pub const DEFAULT_RATE_HZ: f64 = 60.0;

    /// Ticks `rate_hz` times per second. Non-positive or non-finite rates
    /// fall back to [`Self::DEFAULT_RATE_HZ`].
    pub fn new(rate_hz: f64) -> Self {
        let rate = if rate_hz.is_finite() && rate_hz > 0.0 { rate_hz } else { Self::DEFAULT_RATE_HZ };
        Self::with_interval(Duration::from_secs_f64(1.0 / rate))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self { epoch: Instant::now(), interval, deadline: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for IntervalHost {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE_HZ)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameHost for IntervalHost {
    fn now(&mut self) -> Duration {
        self.epoch.elapsed()
    }

    fn next_frame(&mut self) -> Duration {
        let now = Instant::now();
        let deadline = self.deadline.unwrap_or(now + self.interval);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }

        let tick = Instant::now();
        self.deadline = Some(if tick > deadline + self.interval {
            tick + self.interval
        } else {
            deadline + self.interval
        });

        tick.saturating_duration_since(self.epoch)
    }
}
