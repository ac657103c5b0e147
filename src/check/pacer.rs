use std::thread;
use std::time::Duration;

/// Spaces successive checks out so large runs do not trip provider rate
/// limits or greylisting heuristics.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    first: bool,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            first: true,
        }
    }

    /// Sleeps for the configured interval before every check except the
    /// first. A zero interval disables pacing entirely.
    pub fn pace(&mut self) {
        if self.first {
            self.first = false;
            return;
        }
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
    }
}
