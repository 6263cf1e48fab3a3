use std::time::Duration;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Host timestamp of the tick, measured from the host's epoch.
    pub now: Duration,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots from host timestamps.
///
/// Timestamps are `Duration`s since an epoch chosen by the host (process start,
/// `performance.now()` origin, ...), which keeps the clock usable where
/// `std::time::Instant` is not.
///
/// Delta time is reported as measured: no smoothing, no clamping. A timestamp
/// earlier than the previous one yields a zero delta, never a negative one.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Duration,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a clock whose first tick measures from `start`.
    pub fn new(start: Duration) -> Self {
        Self { last: start, frame_index: 0 }
    }

    /// Resets the clock baseline.
    pub fn reset(&mut self, now: Duration) {
        self.last = now;
    }

    /// Number of ticks taken so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock to `now` and returns a new `FrameTime`.
    pub fn tick(&mut self, now: Duration) -> FrameTime {
        let dt = now.saturating_sub(self.last);
        self.last = now.max(self.last);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self
            .frame_index
            .wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration { Duration::from_millis(v) }

    #[test]
    fn first_tick_measures_from_start() {
        let mut clock = FrameClock::new(ms(100));
        let ft = clock.tick(ms(116));
        assert!((ft.dt - 0.016).abs() < 1e-6);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn deltas_are_not_clamped() {
        let mut clock = FrameClock::new(ms(0));
        assert_eq!(clock.tick(ms(5_000)).dt, 5.0);
        assert_eq!(clock.tick(ms(5_000)).dt, 0.0);
    }

    #[test]
    fn backwards_timestamps_give_zero_delta() {
        let mut clock = FrameClock::new(ms(0));
        clock.tick(ms(50));
        assert_eq!(clock.tick(ms(20)).dt, 0.0);
        // The baseline does not move backwards either.
        assert!((clock.tick(ms(60)).dt - 0.010).abs() < 1e-6);
    }

    #[test]
    fn frame_index_counts_ticks() {
        let mut clock = FrameClock::new(ms(0));
        for i in 0..3 {
            assert_eq!(clock.tick(ms(i * 10)).frame_index, i);
        }
        assert_eq!(clock.frames(), 3);
    }
}
