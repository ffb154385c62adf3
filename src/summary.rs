//! Dashboard totals: income, expenses and the net balance of a list of transactions.

use crate::error::DataFormatError;
use crate::format::Formatter;
use crate::model::{Amount, Direction, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One of the three dashboard cards.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// The raw total.
    value: Decimal,
    /// `value` formatted as money.
    amount: String,
    /// A description of the most recent transaction in this bucket. For the total it is the span
    /// up to the most recent expense. Empty when there is no such transaction.
    last_transaction: String,
    /// The date behind `last_transaction`.
    last_date: Option<NaiveDate>,
}

impl Highlight {
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn last_transaction(&self) -> &str {
        &self.last_transaction
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last_date
    }
}

/// A transaction with its amount and date ready for display in a list.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ListedTransaction {
    id: String,
    name: String,
    amount: String,
    #[serde(rename = "type")]
    direction: Direction,
    category: String,
    date: String,
}

impl ListedTransaction {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    entries: Highlight,
    expenses: Highlight,
    total: Highlight,
    transactions: Vec<ListedTransaction>,
}

impl Summary {
    /// Income.
    pub fn entries(&self) -> &Highlight {
        &self.entries
    }

    pub fn expenses(&self) -> &Highlight {
        &self.expenses
    }

    /// Income minus expenses.
    pub fn total(&self) -> &Highlight {
        &self.total
    }

    /// The input transactions, in input order, formatted for display.
    pub fn transactions(&self) -> &[ListedTransaction] {
        &self.transactions
    }
}

/// Running sum and latest date of one direction.
#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    sum: Amount,
    last: Option<NaiveDate>,
}

impl Bucket {
    fn add(
        &mut self,
        t: &Transaction,
        amount: Amount,
        date: NaiveDate,
    ) -> Result<(), DataFormatError> {
        self.sum = self
            .sum
            .checked_add(amount)
            .ok_or_else(|| DataFormatError::total_overflow(t.id(), amount.to_string()))?;
        self.last = self.last.max(Some(date));
        Ok(())
    }
}

/// Totals `transactions` by direction and formats the result with `formatter`.
///
/// The order of `transactions` does not matter for the totals. Every record's amount and date is
/// interpreted, and the first one that cannot be, or that pushes a total past the largest
/// `Decimal`, is returned as an error. An empty input is valid
/// and yields zero totals with empty `last_transaction` labels.
pub fn summarize(
    transactions: &[Transaction],
    formatter: &Formatter,
) -> Result<Summary, DataFormatError> {
    let mut entries = Bucket::default();
    let mut expenses = Bucket::default();
    let mut listed = Vec::with_capacity(transactions.len());

    for t in transactions {
        let amount = t.amount()?;
        let date = t.date()?;
        match t.direction() {
            Direction::Positive => entries.add(t, amount, date)?,
            Direction::Negative => expenses.add(t, amount, date)?,
        }
        listed.push(ListedTransaction {
            id: t.id().to_string(),
            name: t.name().to_string(),
            amount: formatter.money(amount.value()),
            direction: t.direction(),
            category: t.category().to_string(),
            date: formatter.short_date(date),
        });
    }

    // Both sums are non-negative.
    let net = entries.sum - expenses.sum;
    debug!(
        "Summarized {} transactions: entries {}, expenses {}, net {}",
        transactions.len(),
        entries.sum,
        expenses.sum,
        net
    );

    Ok(Summary {
        entries: Highlight {
            value: entries.sum.value(),
            amount: formatter.money(entries.sum.value()),
            last_transaction: formatter.last_entry_label(entries.last),
            last_date: entries.last,
        },
        expenses: Highlight {
            value: expenses.sum.value(),
            amount: formatter.money(expenses.sum.value()),
            last_transaction: formatter.last_expense_label(expenses.last),
            last_date: expenses.last,
        },
        total: Highlight {
            value: net.value(),
            amount: formatter.money(net.value()),
            last_transaction: formatter.interval_label(expenses.last),
            last_date: expenses.last,
        },
        transactions: listed,
    })
}
