//! Storage abstractions for the service layer
//!
//! A resource collection is a list of schemaless JSON objects persisted as a
//! whole. Handlers never talk to a store directly; they go through
//! [`crate::repository::ResourceRepository`], so a relational backend can
//! implement [`CollectionStore`] without touching handler code.

use async_trait::async_trait;
use thiserror::Error;

pub mod json_collection_store;
pub mod memory_store;

/// One record of a collection: a flat JSON object with a string `id`.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("document for {resource} is not {{\"{resource}\": [objects]}}")]
    Shape { resource: String },
}

/// Whole-collection load/replace boundary.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Read every record of `resource`.
    async fn load(&self, resource: &str) -> Result<Vec<Record>, StorageError>;
    /// Replace the stored collection with `records`.
    async fn save(&self, resource: &str, records: &[Record]) -> Result<(), StorageError>;
}
