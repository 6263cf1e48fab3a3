//! Time subsystem.
//!
//! Converts host frame timestamps into per-frame deltas without coupling to
//! any particular host:
//! - one `FrameClock` per frame loop
//! - call `tick(now)` once per host frame to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
