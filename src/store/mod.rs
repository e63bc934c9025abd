#[cfg(test)]
mod tests;
mod transaction_store;

pub use transaction_store::TransactionStore;
