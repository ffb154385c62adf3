//! The local key-value store in which the transaction list is persisted.
//!
//! The store maps string keys to string values. The transactions live under a single key as a
//! serialized JSON array. `FileStorage` keeps the whole map in one JSON file; `MemoryStorage` keeps
//! it in memory and is what tests use.

use crate::model::Transaction;
use crate::{utils, Result};
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, trace, warn};

/// The key under which the transaction list is stored.
pub const TRANSACTIONS_KEY: &str = "@gofinances:transactions";

/// A minimal asynchronous key-value store.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is none.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;
}

/// Stores all keys in a single JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty store if the file does not exist yet.
    pub async fn init(&self) -> Result<()> {
        if !self.path.is_file() {
            self.write_map(&BTreeMap::new()).await?;
        }
        Ok(())
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.is_file() {
            return Ok(BTreeMap::new());
        }
        utils::deserialize(&self.path).await
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let data = serde_json::to_string_pretty(map).context("Unable to serialize storage")?;
        utils::write(&self.path, data).await
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        trace!("get_item {key} from {}", self.path.display());
        Ok(self.read_map().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        trace!("set_item {key} in {}", self.path.display());
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value);
        self.write_map(&map).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        trace!("remove_item {key} from {}", self.path.display());
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

/// Keeps all keys in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map is still a valid map.
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Reads the transaction list.
///
/// A missing key is an empty list. A failed read and a value that is not a JSON array of
/// transaction records are errors.
pub async fn read_transactions(storage: &dyn Storage) -> Result<Vec<Transaction>> {
    let Some(raw) = storage
        .get_item(TRANSACTIONS_KEY)
        .await
        .context("Unable to read stored transactions")?
    else {
        debug!("No transactions are stored under {TRANSACTIONS_KEY}");
        return Ok(Vec::new());
    };
    let transactions: Vec<Transaction> =
        serde_json::from_str(&raw).context("Stored transactions are not a valid list")?;
    debug!("Loaded {} transactions", transactions.len());
    Ok(transactions)
}

/// Reads the transaction list for display.
///
/// Never fails: where `read_transactions` would return an error, this logs a warning and returns
/// an empty list.
pub async fn load_transactions(storage: &dyn Storage) -> Vec<Transaction> {
    match read_transactions(storage).await {
        Ok(transactions) => transactions,
        Err(e) => {
            warn!("Treating stored transactions as empty: {e:#}");
            Vec::new()
        }
    }
}

/// Replaces the stored transaction list with `transactions`.
pub async fn save_transactions(storage: &dyn Storage, transactions: &[Transaction]) -> Result<()> {
    let json = serde_json::to_string(transactions).context("Unable to serialize transactions")?;
    storage.set_item(TRANSACTIONS_KEY, json).await
}

/// Adds `transaction` to the end of the stored list.
///
/// Nothing is written when the existing list cannot be read, so an unreadable value is never
/// replaced.
pub async fn append_transaction(storage: &dyn Storage, transaction: Transaction) -> Result<()> {
    let mut transactions = read_transactions(storage)
        .await
        .context("Refusing to append to a transaction list that cannot be read")?;
    transactions.push(transaction);
    save_transactions(storage, &transactions).await
}

/// Removes the stored transaction list.
pub async fn clear_transactions(storage: &dyn Storage) -> Result<()> {
    storage.remove_item(TRANSACTIONS_KEY).await
}
