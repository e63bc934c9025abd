use chrono::SecondsFormat;
use rust_decimal::Decimal;

use crate::models::TransactionType;
use crate::types::{Timestamp, TransactionId};

/// A single income or expense record.
///
/// Instances only ever come out of the normalizer or the store's `add`, so every
/// field is already repaired and well-typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Opaque unique identifier, immutable once assigned.
    pub id: TransactionId,
    /// Free text, `"N/A"` when nothing usable was supplied.
    pub description: String,
    /// Amount of the entry. The sign is not enforced.
    pub amount: Decimal,
    /// Persisted under the `type` key.
    pub transaction_type: TransactionType,
    /// When the entry was recorded.
    pub date: Timestamp
}

impl Transaction {
    /// The date in the persisted form, RFC 3339 with milliseconds and a `Z` suffix.
    pub fn date_string(&self) -> String {
        self.date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }
}
