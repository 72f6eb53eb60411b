use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::clock::{Clock, Timestamp};

/// Real time in milliseconds that never goes backwards, even if the system time does.
///
/// The epoch is read once on creation; afterwards only the monotonic clock is consulted.
pub struct MonotonicClock {
    origin: Instant,
    origin_timestamp: Timestamp,
}

impl MonotonicClock {
    pub fn new() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| u64::try_from(d.as_millis()).ok())
            .unwrap_or(u64::MAX);
        Self::starting_at(Timestamp::from_ms(since_epoch))
    }

    /// Runs in real time but reports `start` right now, e.g. zero for a simulation.
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            origin: Instant::now(),
            origin_timestamp: start,
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&mut self) -> Timestamp {
        let elapsed_ms = u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.origin_timestamp.adding(elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_goes_backwards() {
        let mut clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
        // Somewhere after 2020
        assert!(first.ms_since_1970 > 1_577_836_800_000);
    }

    #[test]
    fn test_starting_at() {
        let mut clock = MonotonicClock::starting_at(Timestamp::from_ms(0));
        assert!(clock.now().ms_since_1970 < 60_000);
    }
}
