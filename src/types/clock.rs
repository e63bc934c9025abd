use chrono::{SubsecRound, Utc};

use crate::types::{Clock, Timestamp};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        //NOTE: Persisted dates carry milliseconds only, anything finer would not survive a reload
        Utc::now().trunc_subsecs(3)
    }
}

/// A clock frozen at a single instant.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
