#[cfg(test)]
use std::cell::Cell;

use uuid::Uuid;

use crate::types::{IdGenerator, TransactionId};

/// Generates random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> TransactionId {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic generator producing `<prefix>-1`, `<prefix>-2`, ...
#[cfg(test)]
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: Cell<u64>
}

#[cfg(test)]
impl SequentialIdGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            counter: Cell::new(0)
        }
    }
}

#[cfg(test)]
impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> TransactionId {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        format!("{}-{}", self.prefix, next)
    }
}
