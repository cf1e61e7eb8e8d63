use super::Easing;

/// One sample of an [`Interpolator`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Step {
    /// Eased progress. Exactly `1.0` on the completing step.
    pub value: f64,
    pub done: bool,
}

/// Resumable progress generator.
///
/// The first `step` captures its `now` as the start time. Every later step
/// yields `easing((now - start) / duration)` until `now - start >= duration`,
/// at which point the step reports `done` with a value of exactly `1.0`.
/// Timestamps must be non-decreasing; stepping after `done` is a caller bug.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolator {
    duration: f64,
    easing: Easing,
    start: Option<f64>,
}

impl Interpolator {
    pub fn new(duration: f64, easing: Easing) -> Self {
        Self { duration, easing, start: None }
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[inline]
    pub fn has_started(&self) -> bool {
        self.start.is_some()
    }

    pub fn step(&mut self, now: f64) -> Step {
        let start = *self.start.get_or_insert(now);
        debug_assert!(now >= start, "interpolator fed a timestamp before its start");

        let elapsed = now - start;
        if elapsed >= self.duration {
            return Step { value: 1.0, done: true };
        }

        Step {
            value: self.easing.apply(elapsed / self.duration),
            done: false,
        }
    }
}
