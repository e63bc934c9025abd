use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::error;

use crate::models::Transaction;

/// Totals derived from a transaction collection.
///
/// When a total lies outside the decimal range it is saturated to `Decimal::MAX`
/// or `Decimal::MIN` and `overflowed` is set; the figures are then bounds, not
/// exact values.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub overflowed: bool
}

impl Summary {
    /// Full re-scan of the collection. Anything that is not income counts as an expense.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let income = transactions.iter().filter(|transaction| transaction.is_income()).map(|transaction| transaction.amount);
        let expenses = transactions.iter().filter(|transaction| !transaction.is_income()).map(|transaction| transaction.amount);
        let signed = transactions.iter().map(|transaction| {
            if transaction.is_income() { transaction.amount } else { -transaction.amount }
        });

        let total_income = exact_sum(income);
        let total_expenses = exact_sum(expenses);
        let balance = exact_sum(signed);

        let summary = Self {
            total_income: total_income.value(),
            total_expenses: total_expenses.value(),
            balance: balance.value(),
            overflowed: total_income.is_saturated() || total_expenses.is_saturated() || balance.is_saturated()
        };

        if summary.overflowed {
            error!("Totals exceed the decimal range, income [{}] expenses [{}] balance [{}] are saturated", summary.total_income, summary.total_expenses, summary.balance);
        }

        summary
    }
}

#[derive(Debug, Clone, Copy)]
enum Total {
    Exact(Decimal),
    Saturated(Decimal)
}

impl Total {
    fn saturate(sign: Ordering) -> Self {
        match sign {
            Ordering::Less => Total::Saturated(Decimal::MIN),
            _ => Total::Saturated(Decimal::MAX)
        }
    }

    fn value(&self) -> Decimal {
        match self {
            Total::Exact(value) | Total::Saturated(value) => *value
        }
    }

    fn is_saturated(&self) -> bool {
        matches!(self, Total::Saturated(_))
    }
}

/// Sums without intermediate overflow: whole parts are accumulated in `i128` and
/// fractional parts are carried into it, so only a final value outside the
/// decimal range saturates. Fractions are added in value order so rounding at the
/// last digit does not depend on input order.
fn exact_sum(amounts: impl Iterator<Item = Decimal>) -> Total {
    let mut whole: i128 = 0;
    let mut fractions = Vec::new();

    for amount in amounts {
        let Some(sum) = amount.trunc().to_i128().and_then(|part| whole.checked_add(part)) else {
            return Total::saturate(amount.cmp(&Decimal::ZERO));
        };

        whole = sum;
        fractions.push(amount.fract());
    }

    fractions.sort();

    let mut fraction = Decimal::ZERO;

    for part in fractions {
        //NOTE: Both sides stay below one in magnitude, the carry keeps it that way
        fraction += part;

        if let Some(carry) = fraction.trunc().to_i128().filter(|carry| *carry != 0) {
            let Some(sum) = whole.checked_add(carry) else {
                return Total::saturate(carry.cmp(&0));
            };

            whole = sum;
            fraction = fraction.fract();
        }
    }

    let sign = whole.cmp(&0).then(fraction.cmp(&Decimal::ZERO));

    match Decimal::try_from_i128_with_scale(whole, 0).ok().and_then(|value| value.checked_add(fraction)) {
        Some(value) => Total::Exact(value),
        None => Total::saturate(sign)
    }
}
