use super::TransactionStore;

use std::rc::Rc;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::TransactionType;
use crate::normalizer::Diagnostic;
use crate::storage::{MemoryStorage, Persistence, DEFAULT_SLOT};
use crate::types::{FixedClock, SequentialIdGenerator, Timestamp};

fn fixed_now() -> Result<Timestamp> {
    Ok(DateTime::parse_from_rfc3339("2025-06-01T08:00:00.000Z")?.with_timezone(&Utc))
}

fn open_store(storage: &Rc<MemoryStorage>) -> Result<TransactionStore<MemoryStorage>> {
    Ok(TransactionStore::open(
        Persistence::new(storage.clone(), DEFAULT_SLOT),
        Box::new(SequentialIdGenerator::new("tx")),
        Box::new(FixedClock(fixed_now()?))
    ))
}

fn stored_ids(storage: &MemoryStorage) -> Result<Vec<String>> {
    let bytes = storage.slot(DEFAULT_SLOT).ok_or_else(|| anyhow!("slot was never written"))?;
    let stored: Value = serde_json::from_slice(&bytes)?;
    let records = stored.as_array().ok_or_else(|| anyhow!("slot does not hold an array"))?;

    Ok(records.iter().filter_map(|record| record["id"].as_str().map(str::to_string)).collect())
}

#[test]
fn test_store_starts_empty_without_stored_data() -> Result<()> {
    let storage = Rc::new(MemoryStorage::new());
    let store = open_store(&storage)?;

    assert!(store.transactions().is_empty());
    assert!(store.diagnostics().is_empty());
    assert!(store.summary().balance.is_zero());
    assert_eq!(storage.writes(), 0);

    Ok(())
}

#[test]
fn test_adding_salary_to_empty_store_updates_summary() -> Result<()> {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = open_store(&storage)?;

    let id = store.add("Salary", Decimal::from(1000), TransactionType::Income);

    assert_eq!(id, "tx-1");
    assert_eq!(store.summary().total_income, Decimal::from(1000));
    assert!(store.summary().total_expenses.is_zero());
    assert_eq!(store.summary().balance, Decimal::from(1000));

    let transaction = store.find(&id).ok_or_else(|| anyhow!("added transaction missing"))?;

    assert_eq!(transaction.description, "Salary");
    assert_eq!(transaction.date, fixed_now()?);

    Ok(())
}

#[test]
fn test_every_mutation_writes_through_to_storage() -> Result<()> {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = open_store(&storage)?;

    store.add("Salary", Decimal::from(1000), TransactionType::Income);
    assert_eq!(storage.writes(), 1);
    assert_eq!(stored_ids(&storage)?, vec!["tx-1"]);

    store.add("Rent", Decimal::from(700), TransactionType::Expense);
    assert_eq!(storage.writes(), 2);
    assert_eq!(stored_ids(&storage)?, vec!["tx-1", "tx-2"]);

    store.delete("tx-1");
    assert_eq!(storage.writes(), 3);
    assert_eq!(stored_ids(&storage)?, vec!["tx-2"]);

    store.delete("unknown");
    assert_eq!(storage.writes(), 4);
    assert_eq!(stored_ids(&storage)?, vec!["tx-2"]);

    Ok(())
}

#[test]
fn test_delete_of_unknown_id_is_a_no_op() -> Result<()> {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = open_store(&storage)?;
    store.add("Salary", Decimal::from(1000), TransactionType::Income);

    let before = store.transactions().to_vec();

    assert!(!store.delete("missing"));
    assert_eq!(store.transactions(), before.as_slice());

    Ok(())
}

#[test]
fn test_add_then_delete_restores_previous_collection() -> Result<()> {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = open_store(&storage)?;
    store.add("Salary", Decimal::from(1000), TransactionType::Income);
    store.add("Rent", Decimal::from(700), TransactionType::Expense);

    let before = store.transactions().to_vec();
    let summary_before = *store.summary();

    let id = store.add("Mistake", Decimal::from(5), TransactionType::Expense);

    assert!(store.delete(&id));
    assert_eq!(store.transactions(), before.as_slice());
    assert_eq!(*store.summary(), summary_before);

    Ok(())
}

#[test]
fn test_delete_keeps_order_of_remaining_transactions() -> Result<()> {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = open_store(&storage)?;

    for description in ["a", "b", "c", "d"] {
        store.add(description, Decimal::ONE, TransactionType::Expense);
    }

    store.delete("tx-2");

    let descriptions: Vec<_> = store.transactions().iter().map(|transaction| transaction.description.as_str()).collect();

    assert_eq!(descriptions, vec!["a", "c", "d"]);

    Ok(())
}

#[test]
fn test_income_and_expense_produce_expected_balance() -> Result<()> {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = open_store(&storage)?;

    store.add("Salary", Decimal::from(1000), TransactionType::Income);
    store.add("Groceries", Decimal::from(200), TransactionType::Expense);

    assert_eq!(store.summary().balance, Decimal::from(800));

    Ok(())
}

#[test]
fn test_store_is_seeded_from_normalized_slot() -> Result<()> {
    let payload = br#"[
        {"id":"a","description":"Salary","amount":1000,"type":"INCOME","date":"2024-01-01T00:00:00.000Z"},
        {"id":"b","amount":"50","type":"income","date":"not-a-date"}
    ]"#;
    let storage = Rc::new(MemoryStorage::with_slot(DEFAULT_SLOT, payload));
    let store = open_store(&storage)?;

    assert_eq!(store.transactions().len(), 2);
    assert_eq!(store.transactions()[1].transaction_type, TransactionType::Expense);
    assert_eq!(store.transactions()[1].date, fixed_now()?);
    assert_eq!(store.summary().balance, Decimal::from(950));
    assert!(matches!(store.diagnostics(), [Diagnostic::InvalidDate { id, .. }] if id == "b"));
    assert_eq!(storage.writes(), 0);

    Ok(())
}

#[test]
fn test_garbage_in_slot_starts_empty_store() -> Result<()> {
    let storage = Rc::new(MemoryStorage::with_slot(DEFAULT_SLOT, b"not-json"));
    let mut store = open_store(&storage)?;

    assert!(store.transactions().is_empty());
    assert_eq!(store.diagnostics().len(), 1);

    store.add("Fresh start", Decimal::from_str("9.99")?, TransactionType::Income);

    assert_eq!(stored_ids(&storage)?, vec!["tx-1"]);

    Ok(())
}

#[test]
fn test_failed_writes_leave_memory_state_authoritative() -> Result<()> {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = open_store(&storage)?;
    store.add("Salary", Decimal::from(1000), TransactionType::Income);

    storage.set_fail_writes(true);

    let id = store.add("Rent", Decimal::from(300), TransactionType::Expense);

    assert!(store.find(&id).is_some());
    assert_eq!(store.summary().balance, Decimal::from(700));
    assert_eq!(stored_ids(&storage)?, vec!["tx-1"]);

    storage.set_fail_writes(false);
    store.delete("tx-1");

    assert_eq!(stored_ids(&storage)?, vec![id]);

    Ok(())
}

#[test]
fn test_reopening_store_yields_same_collection() -> Result<()> {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = open_store(&storage)?;

    store.add("Salary", Decimal::from_str("2500.75")?, TransactionType::Income);
    store.add("Rent", Decimal::from(900), TransactionType::Expense);

    let reopened = open_store(&storage)?;

    assert_eq!(reopened.transactions(), store.transactions());
    assert_eq!(reopened.summary(), store.summary());
    assert!(reopened.diagnostics().is_empty());

    Ok(())
}

#[test]
fn test_reopening_store_keeps_high_precision_amounts() -> Result<()> {
    let storage = Rc::new(MemoryStorage::new());
    let mut store = open_store(&storage)?;

    store.add("Savings", Decimal::from_str("12345678901234567.89")?, TransactionType::Income);
    store.add("Interest", Decimal::from_str("0.1")?, TransactionType::Income);

    let reopened = open_store(&storage)?;
    let amounts: Vec<String> = reopened.transactions().iter().map(|transaction| transaction.amount.to_string()).collect();

    assert_eq!(amounts, vec!["12345678901234567.89", "0.1"]);
    assert_eq!(reopened.transactions(), store.transactions());
    assert_eq!(reopened.summary().total_income, Decimal::from_str("12345678901234567.99")?);

    Ok(())
}
