// ============================================================================
// STORAGE - Durable key/value cache (localStorage in the browser)
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

use crate::error::{PortalError, Result};

/// String key/value store that survives a page reload
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Browser `window.localStorage`
///
/// Storage can be blocked (privacy settings, sandboxed iframes). The store
/// then reads nothing and rejects writes, so the app still renders.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn open() -> Self {
        let storage = window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("⚠️ localStorage unavailable, session will not survive a reload");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| PortalError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| PortalError::Storage(format!("could not write '{}'", key)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|_| PortalError::Storage(format!("could not remove '{}'", key)))
    }
}

/// Read and decode a JSON value; unreadable entries count as absent
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ Ignoring unreadable '{}' entry in storage: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}
