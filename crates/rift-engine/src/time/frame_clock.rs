use std::time::{Duration, Instant};

/// Millisecond timestamps fed to tweens, delays and node updates.
///
/// `now` is monotonic for the lifetime of one clock; `delta` is the clamped
/// time since the previous tick.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Tick {
    pub now: f64,
    pub delta: f64,
}

impl Tick {
    #[inline]
    pub const fn new(now: f64, delta: f64) -> Self {
        Self { now, delta }
    }

    /// The tick that follows this one after `delta` milliseconds.
    #[inline]
    pub fn advance(self, delta: f64) -> Self {
        Self { now: self.now + delta, delta }
    }
}

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,

    /// Milliseconds elapsed since the clock was created (sum of clamped deltas).
    pub elapsed_ms: f64,
}

impl FrameTime {
    #[inline]
    pub fn tick(&self) -> Tick {
        Tick::new(self.elapsed_ms, self.dt as f64 * 1000.0)
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls. Elapsed time accumulates the clamped deltas so
/// tweens never jump by more than one clamp after a stall.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    elapsed_ms: f64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (100us .. 250ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            elapsed_ms: 0.0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline.
    ///
    /// Used when a window regains focus so the first frame back is not a stall.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = self.clamp(now.saturating_duration_since(self.last));

        self.last = now;
        self.elapsed_ms += dt.as_secs_f64() * 1000.0;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
            elapsed_ms: self.elapsed_ms,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }

    fn clamp(&self, dt: Duration) -> Duration {
        dt.clamp(self.dt_min, self.dt_max)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stalls_are_clamped() {
        let clock = FrameClock::new();
        assert_eq!(clock.clamp(Duration::from_secs(3)), Duration::from_millis(250));
        assert_eq!(clock.clamp(Duration::ZERO), Duration::from_micros(100));
    }

    #[test]
    fn elapsed_is_monotonic_across_ticks() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b.elapsed_ms > a.elapsed_ms);
        assert_eq!(b.frame_index, a.frame_index + 1);
    }

    #[test]
    fn tick_advance_accumulates_now() {
        let t = Tick::new(100.0, 16.0).advance(20.0);
        assert_eq!(t, Tick::new(120.0, 20.0));
    }
}
