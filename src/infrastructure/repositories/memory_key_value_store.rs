use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::repositories::key_value_store::KeyValueStore;

/// Volatile in-memory implementation of the [`KeyValueStore`] port.
///
/// Nothing survives the process; intended for tests and for embedding the
/// roster service without a data directory.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, DomainError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), DomainError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), DomainError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn set_get_del_round_trip() {
        let store = MemoryKeyValueStore::new();

        assert!(store.get("k").await.expect("get").is_none());

        store.set("k", json!({"a": 1})).await.expect("set");
        assert_eq!(store.get("k").await.expect("get"), Some(json!({"a": 1})));

        store.del("k").await.expect("del");
        assert!(store.get("k").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn deleting_an_absent_key_succeeds() {
        let store = MemoryKeyValueStore::new();

        store.del("missing").await.expect("del");
    }
}
