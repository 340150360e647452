//! Generic list/get/create/update/delete over one resource collection.
//!
//! Every call reloads the collection from the store. Mutations of the same
//! resource are serialized by a per-resource mutex held across the whole
//! load → mutate → save cycle, so two concurrent writers in this process
//! cannot clobber each other. Storage failures do not surface: a failed
//! load reads as an empty collection and a failed save is logged and dropped.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::resources::ResourceSpec;
use crate::storage::{CollectionStore, Record};

pub const ID_FIELD: &str = "id";

pub struct ResourceRepository {
    store: Arc<dyn CollectionStore>,
    write_locks: DashMap<&'static str, Arc<Mutex<()>>>,
}

fn record_id(record: &Record) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

impl ResourceRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store, write_locks: DashMap::new() }
    }

    fn write_lock(&self, resource: &'static str) -> Arc<Mutex<()>> {
        self.write_locks.entry(resource).or_default().clone()
    }

    async fn load(&self, spec: &ResourceSpec) -> Vec<Record> {
        match self.store.load(spec.name).await {
            Ok(records) => records,
            Err(e) => {
                error!(resource = spec.name, error = %e, "collection read failed; serving it as empty");
                Vec::new()
            }
        }
    }

    async fn persist(&self, spec: &ResourceSpec, records: &[Record]) {
        if let Err(e) = self.store.save(spec.name, records).await {
            error!(resource = spec.name, error = %e, "collection write failed; change dropped");
        }
    }

    /// All records passing every present filter, redacted for the wire.
    pub async fn list<'q, I>(&self, spec: &ResourceSpec, query: I) -> Vec<Record>
    where
        I: IntoIterator<Item = (&'q str, &'q str)> + Clone,
    {
        self.load(spec)
            .await
            .into_iter()
            .map(|r| spec.redact(r))
            .filter(|r| spec.matches(r, query.clone()))
            .collect()
    }

    /// One record by id, redacted for the wire.
    pub async fn get(&self, spec: &ResourceSpec, id: &str) -> Result<Record, ServiceError> {
        self.load(spec)
            .await
            .into_iter()
            .find(|r| record_id(r) == Some(id))
            .map(|r| spec.redact(r))
            .ok_or(ServiceError::not_found(spec.label))
    }

    /// First stored record (not redacted) satisfying `pred`.
    pub async fn find_first<F>(&self, spec: &ResourceSpec, pred: F) -> Option<Record>
    where
        F: Fn(&Record) -> bool,
    {
        self.load(spec).await.into_iter().find(|r| pred(r))
    }

    /// Store `body` under a fresh id and return the stored record as is.
    #[instrument(skip(self, spec, body), fields(resource = spec.name))]
    pub async fn create(&self, spec: &'static ResourceSpec, body: Record) -> Record {
        let lock = self.write_lock(spec.name);
        let _guard = lock.lock().await;
        let mut records = self.load(spec).await;
        let created = with_new_id(body);
        records.push(created.clone());
        self.persist(spec, &records).await;
        info!(id = record_id(&created), "record_created");
        created
    }

    /// Like [`Self::create`], but fails with a conflict when a stored record
    /// already has the same string value in `unique_field`.
    #[instrument(skip(self, spec, body), fields(resource = spec.name))]
    pub async fn create_unique(
        &self,
        spec: &'static ResourceSpec,
        unique_field: &str,
        conflict_message: &str,
        body: Record,
    ) -> Result<Record, ServiceError> {
        let lock = self.write_lock(spec.name);
        let _guard = lock.lock().await;
        let mut records = self.load(spec).await;
        let wanted = body.get(unique_field).and_then(Value::as_str);
        if wanted.is_some() && records.iter().any(|r| r.get(unique_field).and_then(Value::as_str) == wanted) {
            return Err(ServiceError::Conflict(conflict_message.to_string()));
        }
        let created = with_new_id(body);
        records.push(created.clone());
        self.persist(spec, &records).await;
        info!(id = record_id(&created), "record_created");
        Ok(created)
    }

    /// Shallow-merge `patch` into the record; `id` is never overwritten.
    #[instrument(skip(self, spec, patch), fields(resource = spec.name))]
    pub async fn update(&self, spec: &'static ResourceSpec, id: &str, patch: Record) -> Result<Record, ServiceError> {
        let lock = self.write_lock(spec.name);
        let _guard = lock.lock().await;
        let mut records = self.load(spec).await;
        let existing = records
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
            .ok_or(ServiceError::not_found(spec.label))?;
        for (key, value) in patch {
            if key != ID_FIELD {
                existing.insert(key, value);
            }
        }
        let merged = existing.clone();
        self.persist(spec, &records).await;
        info!("record_updated");
        Ok(merged)
    }

    #[instrument(skip(self, spec), fields(resource = spec.name))]
    pub async fn delete(&self, spec: &'static ResourceSpec, id: &str) -> Result<(), ServiceError> {
        let lock = self.write_lock(spec.name);
        let _guard = lock.lock().await;
        let records = self.load(spec).await;
        let before = records.len();
        let kept: Vec<Record> = records.into_iter().filter(|r| record_id(r) != Some(id)).collect();
        if kept.len() == before {
            return Err(ServiceError::not_found(spec.label));
        }
        self.persist(spec, &kept).await;
        info!(removed = before - kept.len(), "record_deleted");
        Ok(())
    }
}

fn with_new_id(body: Record) -> Record {
    let mut record = Record::new();
    record.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
    for (key, value) in body {
        if key != ID_FIELD {
            record.insert(key, value);
        }
    }
    record
}
