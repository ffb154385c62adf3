use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::format::{Currency, LocaleTag};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and:
/// - Creates an initial `config.json` file with `locale` and `currency`
/// - Creates an empty key-value store
///
/// # Errors
/// - Returns an error if the home directory already holds a `config.json`.
/// - Returns an error if any file operations fail.
pub async fn init(home: &Path, locale: LocaleTag, currency: Currency) -> Result<Out<()>> {
    let config = Config::create(home, locale, currency)
        .await
        .context("Unable to create the home directory and config")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the gofinances home at {}",
        config.root().display()
    )
    .into())
}
