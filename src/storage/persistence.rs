use std::rc::Rc;

use serde::Serialize;
use serde_json::Number;
use tracing::{debug, error};

use crate::models::{Transaction, TransactionType};
use crate::storage::{PersistenceError, Storage};

pub const DEFAULT_SLOT: &str = "transactions";

/// Persisted shape of a single transaction.
#[derive(Debug, Serialize)]
struct TransactionRecord<'a> {
    id: &'a str,
    description: &'a str,
    amount: Number,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    date: String
}

impl<'a> TryFrom<&'a Transaction> for TransactionRecord<'a> {
    type Error = serde_json::Error;

    fn try_from(transaction: &'a Transaction) -> Result<Self, Self::Error> {
        //NOTE: Written digit for digit, a round trip through f64 would lose anything past ~16 significant digits
        let amount = transaction.amount.to_string().parse::<Number>()?;

        Ok(Self {
            id: &transaction.id,
            description: &transaction.description,
            amount,
            transaction_type: transaction.transaction_type,
            date: transaction.date_string()
        })
    }
}

/// Reads and writes the whole transaction collection through one named slot.
///
/// Holds no reference to the collection itself, only snapshots pass through.
pub struct Persistence<S: Storage> {
    storage: Rc<S>,
    slot: String
}

impl<S: Storage> Persistence<S> {
    pub fn new(storage: Rc<S>, slot: &str) -> Self {
        Self {
            storage,
            slot: slot.to_string()
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Raw slot content, or `None` when it was never written.
    ///
    /// A failing read is logged and reported as absent so startup can continue with
    /// an empty collection.
    pub fn load(&self) -> Option<Vec<u8>> {
        match self.storage.load(&self.slot) {
            Ok(bytes) => bytes,
            Err(error) => {
                error!("Could not read slot [{}]: {error}", self.slot);
                None
            }
        }
    }

    pub fn save(&self, transactions: &[Transaction]) -> Result<(), PersistenceError> {
        let records = transactions
            .iter()
            .map(TransactionRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let payload = serde_json::to_vec(&records)?;

        self.storage.save(&self.slot, &payload)?;
        debug!("Saved {} transactions to slot [{}]", records.len(), self.slot);

        Ok(())
    }
}
