use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// Key-value settings backend. Values are opaque text payloads.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_setting(&self, key: &str) -> Result<Option<String>>;
    async fn put_setting(&self, key: &str, payload: &str) -> Result<()>;
}

/// Process-local store used for `--ephemeral` runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| anyhow!("settings lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    async fn put_setting(&self, key: &str, payload: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| anyhow!("settings lock poisoned"))?;
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_overwrites() {
        let s = MemoryStore::new();
        assert_eq!(s.get_setting("k").await.unwrap(), None);
        s.put_setting("k", "one").await.unwrap();
        s.put_setting("k", "two").await.unwrap();
        assert_eq!(s.get_setting("k").await.unwrap().as_deref(), Some("two"));
    }
}
