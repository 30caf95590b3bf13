use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::DomainError;

/// Port over the backing key-value store.
///
/// The store holds arbitrary JSON documents addressed by string keys. Which
/// keys exist and what they contain is decided by the services above; an
/// absent key is a valid state, not an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Value>, DomainError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Value) -> Result<(), DomainError>;

    /// Remove `key`; removing an absent key succeeds
    async fn del(&self, key: &str) -> Result<(), DomainError>;
}
