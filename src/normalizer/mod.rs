mod diagnostics;
mod fields;

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::Transaction;
use crate::types::{Clock, IdGenerator};

pub use diagnostics::Diagnostic;

/// Result of repairing a stored payload.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Normalized {
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<Diagnostic>
}

impl Normalized {
    fn rejected(diagnostic: Diagnostic) -> Self {
        Self {
            transactions: Vec::new(),
            diagnostics: vec![diagnostic]
        }
    }
}

/// Turns untrusted stored data into well-typed transactions.
///
/// Each field is repaired on its own with a fixed fallback, so a record is never
/// dropped for being malformed. Only a payload that is not an array at all yields
/// an empty collection.
pub struct Normalizer<'a> {
    ids: &'a dyn IdGenerator,
    clock: &'a dyn Clock
}

impl<'a> Normalizer<'a> {
    pub fn new(ids: &'a dyn IdGenerator, clock: &'a dyn Clock) -> Self {
        Self { ids, clock }
    }

    pub fn normalize(&self, payload: &[u8]) -> Normalized {
        let normalized = match serde_json::from_slice::<Value>(payload) {
            Ok(value) => self.normalize_value(&value),
            Err(error) => Normalized::rejected(Diagnostic::Decode(error.to_string()))
        };

        for diagnostic in &normalized.diagnostics {
            warn!("{diagnostic}");
        }

        debug!("Normalized {} stored transactions", normalized.transactions.len());

        normalized
    }

    pub fn normalize_value(&self, value: &Value) -> Normalized {
        let Value::Array(records) = value else {
            return Normalized::rejected(Diagnostic::NotASequence { found: fields::kind_of(value) });
        };

        let mut normalized = Normalized::default();

        for record in records {
            let (transaction, diagnostic) = self.normalize_record(record);
            normalized.transactions.push(transaction);
            normalized.diagnostics.extend(diagnostic);
        }

        normalized
    }

    /// Repairs a single record. Non-object records are treated as having no fields.
    pub fn normalize_record(&self, record: &Value) -> (Transaction, Option<Diagnostic>) {
        let id = fields::stored_id(record.get("id")).unwrap_or_else(|| self.ids.next_id());
        let raw_date = record.get("date");

        let (date, diagnostic) = match raw_date.and_then(fields::date) {
            Some(date) => (date, None),
            None => {
                let diagnostic = Diagnostic::InvalidDate {
                    id: id.clone(),
                    value: fields::describe(raw_date)
                };
                (self.clock.now(), Some(diagnostic))
            }
        };

        let transaction = Transaction {
            description: fields::description(record.get("description")),
            amount: fields::amount(record.get("amount")),
            transaction_type: fields::transaction_type(record.get("type")),
            id,
            date
        };

        (transaction, diagnostic)
    }
}
