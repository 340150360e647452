use async_trait::async_trait;
use dashmap::DashMap;

use super::{CollectionStore, Record, StorageError};

/// In-process collection store. A collection that was never saved loads as
/// empty rather than failing, unlike the file store.
#[derive(Default, Debug)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Record>>,
}

impl MemoryStore {
    pub fn with_collection(self, resource: &str, records: Vec<Record>) -> Self {
        self.collections.insert(resource.to_string(), records);
        self
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn load(&self, resource: &str) -> Result<Vec<Record>, StorageError> {
        Ok(self.collections.get(resource).map(|r| r.value().clone()).unwrap_or_default())
    }

    async fn save(&self, resource: &str, records: &[Record]) -> Result<(), StorageError> {
        self.collections.insert(resource.to_string(), records.to_vec());
        Ok(())
    }
}
