//! Configuration file handling.
//!
//! The configuration file is stored at `$GOFINANCES_HOME/config.json` and holds the locale and
//! currency used for display, the location of the key-value store and, optionally, a category
//! catalog that replaces the built-in one.

use crate::format::{Currency, Formatter, LocaleTag};
use crate::model::Catalog;
use crate::storage::FileStorage;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "gofinances";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const STORAGE_JSON: &str = "storage.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$GOFINANCES_HOME` and from there it loads `$GOFINANCES_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    catalog: Catalog,
}

impl Config {
    /// Creates the home directory, an initial `config.json` and an empty store.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists.
    /// - Returns an error if any file operations fail.
    pub async fn create(
        dir: impl Into<PathBuf>,
        locale: LocaleTag,
        currency: Currency,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile {
            locale,
            currency,
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        let config = Self::from_parts(root, config_path, config_file);
        config
            .storage()
            .init()
            .await
            .context("Unable to create the storage file")?;
        Ok(config)
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load the config file
    /// - return the loaded configuration object
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The home directory is missing, run 'gofinances init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        Ok(Self::from_parts(root, config_path, config_file))
    }

    fn from_parts(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Self {
        let catalog = config_file.categories.clone().unwrap_or_default();
        Self {
            root,
            config_path,
            config_file,
            catalog,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The key-value store file. A relative `storage_path` is resolved against the home directory.
    pub fn storage_path(&self) -> PathBuf {
        let p = self.config_file.storage_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.storage_path())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.config_file.locale, self.config_file.currency)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "gofinances",
///   "config_version": 1,
///   "locale": "pt-BR",
///   "currency": "BRL",
///   "storage_path": "storage.json",
///   "categories": [
///     { "key": "rent", "name": "Aluguel", "color": "#3D3D4C" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "gofinances"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Locale used for dates, month names and number separators
    #[serde(default)]
    locale: LocaleTag,

    /// Currency used for amounts
    #[serde(default)]
    currency: Currency,

    /// Path to the key-value store (optional, relative to the home directory or absolute)
    /// Defaults to $GOFINANCES_HOME/storage.json if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    storage_path: Option<PathBuf>,

    /// Replaces the built-in category catalog when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    categories: Option<Catalog>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            locale: LocaleTag::default(),
            currency: Currency::default(),
            storage_path: None,
            categories: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version {} in config file, expected {}",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(STORAGE_JSON))
    }
}
