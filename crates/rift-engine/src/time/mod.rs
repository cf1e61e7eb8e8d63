//! Time subsystem.
//!
//! Provides frame timing without coupling to the runtime.
//! - one `FrameClock` per window, `tick()` once per presented frame
//! - scene code consumes [`Tick`]: millisecond `now` since the clock started
//!   and the clamped millisecond delta since the previous frame

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime, Tick};
