use std::path::Path;
use std::sync::Arc;

use tokio::fs;

use crate::application::services::roster_service::{RenamePolicy, RosterService};
use crate::domain::errors::DomainError;
use crate::infrastructure::repositories::file_key_value_store::FileKeyValueStore;

/// Fully wired application services
pub struct AppServices {
    pub roster_service: Arc<RosterService>,
}

/// Create the data directory and wire the service stack over it
pub async fn build_services(
    data_root: &Path,
    rename_policy: RenamePolicy,
) -> Result<AppServices, DomainError> {
    if !data_root.exists() {
        tracing::info!("Creating data directory: {:?}", data_root);
        fs::create_dir_all(data_root).await.map_err(|e| {
            DomainError::StoreError(format!("Failed to create data directory: {}", e))
        })?;
    }

    let store = Arc::new(FileKeyValueStore::new(data_root.to_path_buf()));
    let roster_service = Arc::new(RosterService::with_policy(store, rename_policy));

    Ok(AppServices { roster_service })
}
