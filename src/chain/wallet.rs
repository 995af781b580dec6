//! Local flag store
//!
//! The only persisted state of the platform: whether a wallet has been
//! connected. Stored under the `walletConnected` key as the string `"true"`,
//! absent otherwise.
//!
//! - **MemoryFlagStore**: process-local, for tests and ephemeral servers
//! - **FileFlagStore**: JSON object file, survives restarts

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::error::ChainResult;

/// Key holding the wallet connection flag
pub const WALLET_CONNECTED_KEY: &str = "walletConnected";

/// String key-value store for small client flags
#[async_trait]
pub trait FlagStore: Send + Sync {
    async fn get(&self, key: &str) -> ChainResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> ChainResult<()>;

    async fn remove(&self, key: &str) -> ChainResult<()>;
}

/// In-memory flag store
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagStore for MemoryFlagStore {
    async fn get(&self, key: &str) -> ChainResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ChainResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> ChainResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Flag store persisted as a JSON object file
///
/// The whole file is rewritten on every change.
#[derive(Debug)]
pub struct FileFlagStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileFlagStore {
    /// Open a store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> ChainResult<Self> {
        let path = path.into();
        let entries = Self::load(&path)?;

        tracing::debug!(path = ?path, entries = entries.len(), "Opened flag store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> ChainResult<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> ChainResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[async_trait]
impl FlagStore for FileFlagStore {
    async fn get(&self, key: &str) -> ChainResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ChainResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    async fn remove(&self, key: &str) -> ChainResult<()> {
        let mut entries = self.entries.write().await;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
