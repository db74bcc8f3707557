pub mod file_store;
#[cfg(test)]
pub mod memory_store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Language;
use crate::ledger::{AmountUnit, Player};

pub use file_store::FileStore;
#[cfg(test)]
pub use memory_store::MemoryStore;

/// Fixed name the ledger snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "monopolyPlayerData";

pub const DEFAULT_INITIAL_AMOUNT: u32 = 15;

/// Everything about the ledger that survives a reload. The running session and
/// its action log are not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default = "default_initial_amount")]
    pub initial_amount: u32,
    #[serde(default)]
    pub amount_unit: AmountUnit,
    #[serde(default, rename = "currentLang")]
    pub language: Option<Language>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

fn default_initial_amount() -> u32 {
    DEFAULT_INITIAL_AMOUNT
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot storage: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key-value blob store holding the single ledger snapshot.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore: Send {
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
    fn erase(&self) -> Result<(), StoreError>;
}
