//! Error types shared across the crate.
//!
//! Most fallible functions return the crate `Result`, which carries an `anyhow::Error`. Stored data
//! that cannot be interpreted is reported with the concrete `DataFormatError` so that callers can
//! `downcast_ref` it out of the `anyhow::Error` when they need to tell it apart.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of a failure surfaced by a command.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The home directory or `config.json` could not be created or loaded.
    Config,
    /// The key-value store could not be read or written.
    Storage,
    /// Stored transaction records could not be interpreted.
    Data,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// Attaches an `ErrorType` to the error of a `Result` at a command boundary.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(format!("A {error_type} error occurred")))
    }
}

/// The field of a transaction record that could not be interpreted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataField {
    Amount,
    Date,
}

serde_plain::derive_display_from_serialize!(DataField);

/// A stored transaction record holds a value that cannot be used in a calculation, for example an
/// amount that is not a number.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DataFormatError {
    id: String,
    field: DataField,
    value: String,
    reason: String,
}

impl DataFormatError {
    pub(crate) fn new(
        id: impl Into<String>,
        field: DataField,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// The amount of transaction `id` pushed a running total past the largest `Decimal`.
    pub(crate) fn total_overflow(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            id,
            DataField::Amount,
            value,
            "adding it makes the total larger than the largest supported amount",
        )
    }

    /// The identifier of the offending transaction.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn field(&self) -> DataField {
        self.field
    }

    /// The raw stored value that failed to parse.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for DataFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction '{}' has an invalid {} '{}': {}",
            self.id, self.field, self.value, self.reason
        )
    }
}

impl std::error::Error for DataFormatError {}
