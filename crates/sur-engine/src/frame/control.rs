/// Control directive returned by frame-loop callbacks.
///
/// Only `Stop` ends a loop. Callbacks returning `()` convert to `Continue`,
/// so "no return value" keeps the loop running.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LoopControl {
    #[default]
    Continue,
    Stop,
}

impl LoopControl {
    pub fn is_stop(self) -> bool {
        self == LoopControl::Stop
    }
}

impl From<()> for LoopControl {
    fn from(_: ()) -> Self {
        LoopControl::Continue
    }
}
