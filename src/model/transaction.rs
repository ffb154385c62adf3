use crate::error::{DataField, DataFormatError};
use crate::model::Amount;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Whether a transaction is income (`positive`) or an expense (`negative`).
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Positive,
    Negative,
}

serde_plain::derive_display_from_serialize!(Direction);
serde_plain::derive_fromstr_from_deserialize!(Direction);

/// The amount exactly as it was found in storage. Older records hold a JSON number, newer ones a
/// string. Any other JSON value is kept as `Other` so that the rest of the list still loads. It is
/// only interpreted when a calculation needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredAmount {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl Default for StoredAmount {
    /// A missing amount.
    fn default() -> Self {
        StoredAmount::Other(serde_json::Value::Null)
    }
}

impl Display for StoredAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StoredAmount::Number(n) => write!(f, "{n}"),
            StoredAmount::Text(s) => write!(f, "{s}"),
            StoredAmount::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<Amount> for StoredAmount {
    fn from(value: Amount) -> Self {
        StoredAmount::Text(value.to_string())
    }
}

/// A single income or expense record as persisted in the transactions list.
///
/// Records are immutable once created. The `amount` and `date` fields are kept in their stored
/// form; use [`Transaction::amount`] and [`Transaction::date`] to interpret them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    id: String,
    name: String,
    #[serde(default)]
    amount: StoredAmount,
    #[serde(rename = "type")]
    direction: Direction,
    #[serde(default)]
    category: String,
    date: String,
}

impl Transaction {
    /// Creates a new record with a random identifier. The date is stored as an RFC 3339
    /// timestamp, which is how records created by the application have always been stored.
    pub fn new(
        name: impl Into<String>,
        amount: Amount,
        direction: Direction,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            amount: amount.into(),
            direction,
            category: category.into(),
            date: date.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Creates a record from already-stored values. Nothing is validated.
    pub fn from_stored(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: StoredAmount,
        direction: Direction,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            direction,
            category: category.into(),
            date: date.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stored_amount(&self) -> &StoredAmount {
        &self.amount
    }

    pub fn stored_date(&self) -> &str {
        &self.date
    }

    /// Interprets the stored amount. Amounts are magnitudes, so a negative value is rejected just
    /// like text that is not a number.
    pub fn amount(&self) -> Result<Amount, DataFormatError> {
        let raw = self.amount.to_string();
        let amount = Amount::from_str(&raw).map_err(|e| {
            DataFormatError::new(&self.id, DataField::Amount, &raw, e.to_string())
        })?;
        if amount.is_negative() {
            return Err(DataFormatError::new(
                &self.id,
                DataField::Amount,
                raw,
                "amounts must not be negative, the direction carries the sign",
            ));
        }
        Ok(amount)
    }

    /// Interprets the stored date. Both full RFC 3339 timestamps (the calendar date is taken in the
    /// timestamp's own offset) and plain `YYYY-MM-DD` dates are accepted.
    pub fn date(&self) -> Result<NaiveDate, DataFormatError> {
        parse_date(&self.date).ok_or_else(|| {
            DataFormatError::new(
                &self.id,
                DataField::Date,
                &self.date,
                "expected an RFC 3339 timestamp or a YYYY-MM-DD date",
            )
        })
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Some(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
