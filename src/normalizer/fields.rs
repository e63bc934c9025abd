use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde_json::{Number, Value};

use crate::models::TransactionType;
use crate::types::{Timestamp, TransactionId};

pub const PLACEHOLDER_DESCRIPTION: &str = "N/A";

/// A non-empty string or a non-zero number; anything else asks for a fresh id.
pub fn stored_id(value: Option<&Value>) -> Option<TransactionId> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if !is_zero(number) => Some(number.to_string()),
        _ => None
    }
}

pub fn description(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Number(number)) if !is_zero(number) => number.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => PLACEHOLDER_DESCRIPTION.to_string()
    }
}

/// Numbers and numeric strings keep their value, `true` counts as one, everything
/// else (including unparsable text) becomes zero. Trailing zeros are dropped, the
/// stored form `1000.0` reads back as `1000`.
pub fn amount(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(number)) => parse_decimal(&number.to_string()),
        Some(Value::String(text)) => parse_decimal(text.trim()),
        Some(Value::Bool(true)) => Some(Decimal::ONE),
        _ => None
    };

    parsed.map(|amount| amount.normalize()).unwrap_or(Decimal::ZERO)
}

pub fn transaction_type(value: Option<&Value>) -> TransactionType {
    value
        .and_then(Value::as_str)
        .and_then(TransactionType::from_stored)
        .unwrap_or(TransactionType::Expense)
}

/// Strings in RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` or `YYYY-MM-DD` (both taken as
/// UTC), or numbers of epoch milliseconds.
pub fn date(value: &Value) -> Option<Timestamp> {
    let parsed = match value {
        Value::String(text) => parse_date(text.trim()),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|millis| millis.is_finite()).map(|millis| millis.trunc() as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None
    };

    parsed.map(|date| date.trunc_subsecs(3))
}

/// How a bad date value is named in diagnostics.
pub fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string()
    }
}

pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object"
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn parse_date(text: &str) -> Option<Timestamp> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(date.and_utc());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

fn is_zero(number: &Number) -> bool {
    number.as_f64() == Some(0.0)
}
