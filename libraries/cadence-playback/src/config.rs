//! Persisted shuffle/repeat configuration

use cadence_core::{KeyValueStore, KeyValueStoreExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::error::Result;

pub const SHUFFLE_KEY: &str = "shuffle";
pub const REPEAT_KEY: &str = "repeat";

/// Playback configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Shuffle new sessions (default: false)
    pub shuffle: bool,

    /// Continue past the end of the track list (default: false)
    pub repeat: bool,
}

/// Reads and writes [`Config`] through the key-value store
///
/// Reads never fail: a missing or unreadable flag is treated as `false`.
#[derive(Clone)]
pub struct ConfigStore {
    store: Arc<dyn KeyValueStore>,
}

impl ConfigStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Config {
        Config {
            shuffle: self.shuffle().await,
            repeat: self.repeat().await,
        }
    }

    pub async fn shuffle(&self) -> bool {
        self.read_flag(SHUFFLE_KEY).await
    }

    pub async fn repeat(&self) -> bool {
        self.read_flag(REPEAT_KEY).await
    }

    pub async fn set_shuffle(&self, shuffle: bool) -> Result<()> {
        Ok(self.store.set_json(SHUFFLE_KEY, &shuffle).await?)
    }

    pub async fn set_repeat(&self, repeat: bool) -> Result<()> {
        Ok(self.store.set_json(REPEAT_KEY, &repeat).await?)
    }

    async fn read_flag(&self, key: &str) -> bool {
        match self.store.get_or(key, false).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read config flag, using default");
                false
            }
        }
    }
}
