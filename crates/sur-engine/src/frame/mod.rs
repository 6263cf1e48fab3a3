//! Frame scheduling.
//!
//! [`run_loop`] drives a callback from a [`FrameHost`]'s ticks until the
//! callback returns [`LoopControl::Stop`]. On wasm32 the browser's
//! `requestAnimationFrame` host lives in `crate::web`.

mod control;
mod host;
mod scheduler;

pub use control::LoopControl;
pub use host::FrameHost;
#[cfg(not(target_arch = "wasm32"))]
pub use host::IntervalHost;
pub use scheduler::run_loop;
