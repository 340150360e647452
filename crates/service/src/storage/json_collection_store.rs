use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use super::{CollectionStore, Record, StorageError};

/// JSON file-backed collection store.
///
/// Each resource lives in `<data_dir>/<resource>.json` as
/// `{ "<resource>": [ ...records ] }`. Saves go to a temp file that is then
/// renamed over the target, so a concurrent reader sees either the previous
/// or the new document, never a partial one.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Initialize the store, creating the data directory if missing.
    pub async fn new<P: Into<PathBuf>>(data_dir: P) -> Result<Arc<Self>, StorageError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await.map_err(|source| StorageError::Io {
            resource: data_dir.display().to_string(),
            source,
        })?;
        Ok(Arc::new(Self { data_dir }))
    }

    pub fn path_for(&self, resource: &str) -> PathBuf {
        self.data_dir.join(format!("{resource}.json"))
    }
}

/// Pull the record list for `resource` out of a parsed document.
pub fn records_from_document(resource: &str, doc: Value) -> Result<Vec<Record>, StorageError> {
    let shape = || StorageError::Shape { resource: resource.to_string() };
    let Value::Object(mut doc) = doc else { return Err(shape()) };
    let Some(Value::Array(items)) = doc.remove(resource) else { return Err(shape()) };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(shape()),
        })
        .collect()
}

/// Wrap records back into `{ "<resource>": [...] }`.
pub fn document_from_records(resource: &str, records: &[Record]) -> Value {
    let items = records.iter().cloned().map(Value::Object).collect();
    let mut doc = serde_json::Map::new();
    doc.insert(resource.to_string(), Value::Array(items));
    Value::Object(doc)
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn load(&self, resource: &str) -> Result<Vec<Record>, StorageError> {
        let path = self.path_for(resource);
        let bytes = fs::read(&path).await.map_err(|source| StorageError::Io {
            resource: resource.to_string(),
            source,
        })?;
        let doc: Value = serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
            resource: resource.to_string(),
            source,
        })?;
        let records = records_from_document(resource, doc)?;
        debug!(resource, count = records.len(), "collection loaded");
        Ok(records)
    }

    async fn save(&self, resource: &str, records: &[Record]) -> Result<(), StorageError> {
        let path = self.path_for(resource);
        let data = serde_json::to_vec_pretty(&document_from_records(resource, records)).map_err(|source| {
            StorageError::Parse { resource: resource.to_string(), source }
        })?;
        let io_err = |source| StorageError::Io { resource: resource.to_string(), source };
        let tmp = self.data_dir.join(format!(".{resource}.{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, data).await.map_err(io_err)?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(io_err(e));
        }
        debug!(resource, count = records.len(), "collection saved");
        Ok(())
    }
}
