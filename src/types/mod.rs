mod clock;
mod ids;

use chrono::{DateTime, Utc};

pub use clock::SystemClock;
#[cfg(test)]
pub use clock::FixedClock;
pub use ids::UuidGenerator;
#[cfg(test)]
pub use ids::SequentialIdGenerator;

pub type TransactionId = String;
pub type Timestamp = DateTime<Utc>;

/// Source of fresh, unique transaction identifiers.
pub trait IdGenerator {
    fn next_id(&self) -> TransactionId;
}

/// Source of the current time, truncated to millisecond precision.
pub trait Clock {
    fn now(&self) -> Timestamp;
}
