//! Easing curves and the resumable interpolator driven by frame ticks.
//!
//! There is no scheduler here: the caller feeds `step(now)` once per frame
//! and stops once it reports `done`.

mod easing;
mod interpolator;

pub use easing::Easing;
pub use interpolator::{Interpolator, Step};
