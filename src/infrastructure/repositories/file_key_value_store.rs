use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::repositories::key_value_store::KeyValueStore;
use crate::infrastructure::logging::logger;
use crate::infrastructure::persistence::file_system::{
    delete_file, read_json_file, write_json_file,
};

/// File-based implementation of the [`KeyValueStore`] port.
///
/// Each key maps to one JSON document under the data directory, with a
/// write-through cache in front so repeated reads skip the filesystem.
pub struct FileKeyValueStore {
    /// Directory holding one `<key>.json` file per key
    data_dir: PathBuf,

    /// Cache of values already read or written
    cache: Arc<Mutex<HashMap<String, Value>>>,
}

impl FileKeyValueStore {
    /// Create a new FileKeyValueStore rooted at `data_dir`
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    async fn ensure_data_dir(&self) -> Result<(), DomainError> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await.map_err(|e| {
                logger::error(&format!(
                    "Failed to create data directory {:?}: {}",
                    self.data_dir, e
                ));
                DomainError::StoreError(format!("Failed to create data directory: {}", e))
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, DomainError> {
        {
            let cache = self.cache.lock().await;
            if let Some(value) = cache.get(key) {
                return Ok(Some(value.clone()));
            }
        }

        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let value: Value = read_json_file(&path).await?;

        let mut cache = self.cache.lock().await;
        cache.insert(key.to_string(), value.clone());

        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), DomainError> {
        self.ensure_data_dir().await?;

        write_json_file(&self.entry_path(key), &value).await?;

        let mut cache = self.cache.lock().await;
        cache.insert(key.to_string(), value);

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), DomainError> {
        delete_file(&self.entry_path(key)).await?;

        let mut cache = self.cache.lock().await;
        cache.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::random;
    use serde_json::json;
    use tokio::fs;

    use crate::application::dto::roster_dto::AddStudentDto;
    use crate::application::services::roster_service::RosterService;

    use super::*;

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("classboard-kv-store-{}", random::<u64>()))
    }

    #[tokio::test]
    async fn values_survive_a_fresh_store_over_the_same_directory() {
        let root = unique_temp_root();

        let store = FileKeyValueStore::new(root.clone());
        store.set("k", json!(["a", "b"])).await.expect("set");

        let reopened = FileKeyValueStore::new(root.clone());
        assert_eq!(
            reopened.get("k").await.expect("get"),
            Some(json!(["a", "b"]))
        );

        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn missing_keys_read_as_none() {
        let root = unique_temp_root();

        let store = FileKeyValueStore::new(root.clone());
        assert!(store.get("missing").await.expect("get").is_none());

        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn deleted_keys_stay_gone_after_reopening() {
        let root = unique_temp_root();

        let store = FileKeyValueStore::new(root.clone());
        store.set("k", json!(1)).await.expect("set");
        store.del("k").await.expect("del");

        let reopened = FileKeyValueStore::new(root.clone());
        assert!(reopened.get("k").await.expect("get").is_none());

        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn roster_survives_a_service_restart() {
        let root = unique_temp_root();

        let service = RosterService::new(Arc::new(FileKeyValueStore::new(root.clone())));
        let alice = service
            .add_student(AddStudentDto {
                name: "Alice".to_string(),
                group: "A".to_string(),
            })
            .await
            .expect("add student");
        service.award_points(&alice.id, 5).await.expect("award");

        let restarted = RosterService::new(Arc::new(FileKeyValueStore::new(root.clone())));
        let snapshot = restarted.get_roster().await.expect("get roster");

        assert_eq!(snapshot.students.len(), 1);
        assert_eq!(snapshot.students[0].points, 5);
        assert_eq!(snapshot.group_order, vec!["A"]);

        let _ = fs::remove_dir_all(&root).await;
    }
}
