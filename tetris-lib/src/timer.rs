/// A countdown sampled against a millisecond clock.
///
/// `interval` fires periodically; `wait` fires once, a fixed delay after it was first
/// polled, and then disarms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntervalTimer {
    mark: Option<u64>,
}

impl IntervalTimer {
    pub const fn new() -> Self {
        Self { mark: None }
    }

    pub fn arm(&mut self, now: u64) {
        self.mark = Some(now);
    }

    pub fn disarm(&mut self) {
        self.mark = None;
    }

    /// Time of the last firing (or arming), if any.
    pub fn mark(&self) -> Option<u64> {
        self.mark
    }

    /// True when at least `millis` passed since the last time this returned true.
    /// An unarmed timer counts from zero.
    pub fn interval(&mut self, now: u64, millis: u64) -> bool {
        let mark = self.mark.unwrap_or(0);
        if now.saturating_sub(mark) >= millis {
            self.mark = Some(now);
            true
        } else {
            false
        }
    }

    /// Arms on the first call; true once `millis` passed since then, disarming the timer.
    pub fn wait(&mut self, now: u64, millis: u64) -> bool {
        match self.mark {
            Some(mark) if now.saturating_sub(mark) >= millis => {
                self.mark = None;
                true
            }
            Some(_) => false,
            None => {
                self.mark = Some(now);
                false
            }
        }
    }
}
