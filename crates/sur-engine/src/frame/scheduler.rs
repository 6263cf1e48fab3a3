use super::control::LoopControl;
use super::host::FrameHost;
use crate::time::FrameClock;

/// Calls `callback(dt)` once per host frame until it returns
/// [`LoopControl::Stop`], and returns how many times it ran.
///
/// `dt` is the wall-clock time in seconds since the previous tick (the first
/// tick measures from loop start). It is never negative and never smoothed
/// or clamped. Panics inside the callback propagate to the caller.
pub fn run_loop<H, F, R>(host: &mut H, mut callback: F) -> u64
where
    H: FrameHost + ?Sized,
    F: FnMut(f32) -> R,
    R: Into<LoopControl>,
{
    let mut clock = FrameClock::new(host.now());

    loop {
        let ft = clock.tick(host.next_frame());
        log::trace!("frame {} dt={:.6}s", ft.frame_index, ft.dt);

        if callback(ft.dt).into().is_stop() {
            return clock.frames();
        }
    }
}
