use crate::args::InsertArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::Transaction;
use crate::storage::append_transaction;
use crate::{Config, Result};
use anyhow::ensure;
use chrono::{NaiveTime, TimeZone, Utc};
use tracing::warn;

/// Records a new transaction at the end of the stored list.
///
/// A random UUID is generated as the transaction id. When `args.date()` is given, the timestamp is
/// noon UTC of that day, otherwise it is the current time.
///
/// # Returns
///
/// On success, returns an `Out` containing a message and the generated id.
///
/// # Errors
///
/// - Returns an error if the amount is zero.
/// - Returns an error if the stored list cannot be read. The store is left untouched.
/// - Returns an error if the store cannot be written.
pub async fn insert(config: Config, args: InsertArgs) -> Result<Out<String>> {
    ensure!(
        !args.amount().is_zero(),
        "The amount of a transaction must be greater than zero"
    );
    if !config.catalog().contains(args.category()) {
        warn!(
            "'{}' is not a known category, the transaction will not appear in the monthly resume",
            args.category()
        );
    }

    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    let date = match args.date() {
        Some(day) => Utc.from_utc_datetime(&day.and_time(noon)),
        None => Utc::now(),
    };
    let transaction = Transaction::new(
        args.name(),
        args.amount(),
        args.direction(),
        args.category(),
        date,
    );
    let id = transaction.id().to_string();

    append_transaction(&config.storage(), transaction)
        .await
        .pub_result(ErrorType::Storage)?;

    Ok(Out::new(format!("Inserted transaction '{}'", args.name()), id))
}
