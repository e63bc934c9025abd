use thiserror::Error;

use crate::types::TransactionId;

/// Non-fatal findings recorded while repairing stored data.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Diagnostic {
    #[error("Stored payload could not be decoded: {0}")]
    Decode(String),
    #[error("Stored payload is {found}, expected an array")]
    NotASequence {
        found: &'static str
    },
    #[error("Transaction [{id}] has an invalid date [{value}], using the current time")]
    InvalidDate {
        id: TransactionId,
        value: String
    }
}
