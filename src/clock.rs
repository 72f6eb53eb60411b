use std::{cell::Cell, rc::Rc};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub ms_since_1970: u64,
}

impl Timestamp {
    pub fn from_ms(ms_since_1970: u64) -> Self {
        Self { ms_since_1970 }
    }

    pub fn adding(&self, ms: u64) -> Self {
        Self {
            ms_since_1970: self.ms_since_1970.saturating_add(ms),
        }
    }

    pub fn removing(&self, ms: u64) -> Self {
        Self {
            ms_since_1970: self.ms_since_1970.saturating_sub(ms),
        }
    }

    pub fn difference(&self, other: &Self) -> Option<u64> {
        self.ms_since_1970.checked_sub(other.ms_since_1970)
    }
}

pub trait Clock {
    fn now(&mut self) -> Timestamp;
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a simulation can hand one copy to an agent
/// and keep another to drive it.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().adding(ms));
    }

    pub fn get(&self) -> Timestamp {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Timestamp {
        self.now.get()
    }
}
