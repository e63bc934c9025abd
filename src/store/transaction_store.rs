use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::models::{Summary, Transaction, TransactionType};
use crate::normalizer::{Diagnostic, Normalizer};
use crate::storage::{Persistence, Storage};
use crate::types::{Clock, IdGenerator, TransactionId};

/// Owns the ordered transaction collection for the running session.
///
/// Every mutation is written through to the persistence slot and the summary is
/// recomputed from scratch. The in-memory collection stays authoritative when a
/// write fails.
pub struct TransactionStore<S: Storage> {
    transactions: Vec<Transaction>,
    summary: Summary,
    diagnostics: Vec<Diagnostic>,
    persistence: Persistence<S>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>
}

impl<S: Storage> TransactionStore<S> {
    /// Seeds the store from whatever the slot holds, repairing it on the way in.
    pub fn open(persistence: Persistence<S>, ids: Box<dyn IdGenerator>, clock: Box<dyn Clock>) -> Self {
        let normalized = match persistence.load() {
            Some(payload) => Normalizer::new(ids.as_ref(), clock.as_ref()).normalize(&payload),
            None => {
                debug!("Slot [{}] is empty, starting with no transactions", persistence.slot());
                Default::default()
            }
        };

        info!("Loaded {} transactions", normalized.transactions.len());

        Self {
            summary: Summary::from_transactions(&normalized.transactions),
            transactions: normalized.transactions,
            diagnostics: normalized.diagnostics,
            persistence,
            ids,
            clock
        }
    }

    /// Appends a new transaction with a fresh id and the current time.
    pub fn add(&mut self, description: &str, amount: Decimal, transaction_type: TransactionType) -> TransactionId {
        let transaction = Transaction {
            id: self.ids.next_id(),
            description: description.to_string(),
            amount,
            transaction_type,
            date: self.clock.now()
        };

        let id = transaction.id.clone();
        debug!("Transaction [{}]:[{}] added", id, transaction.transaction_type);

        self.transactions.push(transaction);
        self.commit();

        id
    }

    /// Removes the transaction with the given id. Returns whether one was removed;
    /// an unknown id is not an error.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);
        let removed = self.transactions.len() != before;

        if removed {
            debug!("Transaction [{id}] deleted");
        } else {
            debug!("Transaction [{id}] not found, nothing deleted");
        }

        self.commit();

        removed
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn find(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|transaction| transaction.id == id)
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Findings recorded while repairing the stored collection at startup.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn commit(&mut self) {
        self.summary = Summary::from_transactions(&self.transactions);

        if let Err(error) = self.persistence.save(&self.transactions) {
            error!("Could not persist {} transactions: {error}", self.transactions.len());
        }
    }
}
