//! Seams between the engine and the hardware (or terminal) it runs on.

use crate::driver::Frame;

/// Discrete player commands, at most one per poll.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Pause,
    Restart,
    Quit,
    ToggleDebug,
    ToggleHelp,
    ToggleStatistics,
}

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

pub trait Timer {
    async fn sleep_millis(&self, millis: u64);
}

/// Non-blocking command source.
pub trait InputSource {
    async fn poll(&mut self) -> Option<Command>;
}

pub trait Renderer {
    async fn render(&mut self, frame: &Frame<'_>);
}

/// Plays a tone for `millis` and returns when it is done.
pub trait Speaker {
    async fn tone(&mut self, hz: u32, millis: u64);
}
