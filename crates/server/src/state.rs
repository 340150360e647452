use std::sync::Arc;

use service::auth::{AuthConfig, AuthService};
use service::repository::ResourceRepository;
use service::storage::json_collection_store::JsonFileStore;
use service::storage::CollectionStore;

/// Process-wide state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<ResourceRepository>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn CollectionStore>, auth: AuthConfig) -> Self {
        let repo = Arc::new(ResourceRepository::new(store));
        let auth = Arc::new(AuthService::new(Arc::clone(&repo), auth));
        Self { repo, auth }
    }

    /// State backed by `<data_dir>/<resource>.json` files.
    pub async fn from_data_dir(data_dir: &str, auth: AuthConfig) -> anyhow::Result<Self> {
        let store = JsonFileStore::new(data_dir).await?;
        Ok(Self::new(store, auth))
    }
}
