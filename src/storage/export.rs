use std::io::Write;

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;

use crate::models::{Transaction, TransactionType};

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    date: String,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: String,
    description: &'a str
}

const HEADER: [&str; 5] = ["id", "date", "type", "amount", "description"];

/// Writes the collection as CSV, in collection order. The header is written even
/// when there is nothing to export.
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(HEADER)?;

    for transaction in transactions {
        writer.serialize(ExportRow {
            id: &transaction.id,
            date: transaction.date_string(),
            transaction_type: transaction.transaction_type,
            amount: transaction.amount.to_string(),
            description: &transaction.description
        })?;
    }

    writer.flush()?;

    Ok(())
}
