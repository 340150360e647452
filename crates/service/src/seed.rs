//! Reset and repopulate the relational store from the JSON collections.
//!
//! Rows are deleted children-first (reviews → … → users) and inserted
//! parents-first (users → … → reviews), following [`RESOURCES`] order.
//! The schema is expected to exist already.

use std::sync::Arc;

use models::errors::ModelError;
use models::{amenity, booking, host, property, review, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument};

use crate::resources::RESOURCES;
use crate::storage::{CollectionStore, Record, StorageError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("database error on {resource}: {reason}")]
    Db { resource: &'static str, reason: String },
}

/// Per-resource row counts of one seed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub deleted: Vec<(&'static str, u64)>,
    pub inserted: Vec<(&'static str, u64)>,
}

impl SeedReport {
    pub fn inserted_total(&self) -> u64 {
        self.inserted.iter().map(|(_, n)| n).sum()
    }
}

/// Decode stored records into typed models, naming the first bad record.
pub fn decode_records<M: DeserializeOwned>(entity: &'static str, records: Vec<Record>) -> Result<Vec<M>, ModelError> {
    records
        .into_iter()
        .map(|r| {
            let id = r.get("id").and_then(Value::as_str).unwrap_or("<no id>").to_string();
            serde_json::from_value(Value::Object(r))
                .map_err(|e| ModelError::Decode { entity, id, reason: e.to_string() })
        })
        .collect()
}

async fn insert_all<A>(db: &DatabaseConnection, resource: &'static str, rows: Vec<A>) -> Result<u64, SeedError>
where
    A: ActiveModelTrait,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    if rows.is_empty() {
        return Ok(0);
    }
    <A::Entity as EntityTrait>::insert_many(rows)
        .exec_without_returning(db)
        .await
        .map_err(|e| SeedError::Db { resource, reason: e.to_string() })
}

async fn delete_all<E: EntityTrait>(db: &DatabaseConnection, resource: &'static str) -> Result<u64, SeedError> {
    E::delete_many()
        .exec(db)
        .await
        .map(|res| res.rows_affected)
        .map_err(|e| SeedError::Db { resource, reason: e.to_string() })
}

async fn clear(db: &DatabaseConnection, resource: &'static str) -> Result<u64, SeedError> {
    match resource {
        "users" => delete_all::<user::Entity>(db, resource).await,
        "hosts" => delete_all::<host::Entity>(db, resource).await,
        "properties" => delete_all::<property::Entity>(db, resource).await,
        "amenities" => delete_all::<amenity::Entity>(db, resource).await,
        "bookings" => delete_all::<booking::Entity>(db, resource).await,
        "reviews" => delete_all::<review::Entity>(db, resource).await,
        _ => Ok(0),
    }
}

async fn fill(db: &DatabaseConnection, resource: &'static str, records: Vec<Record>) -> Result<u64, SeedError> {
    fn active<M: IntoActiveModel<A>, A: ActiveModelTrait>(rows: Vec<M>) -> Vec<A> {
        rows.into_iter().map(|m| m.into_active_model().reset_all()).collect()
    }
    match resource {
        "users" => insert_all(db, resource, active::<_, user::ActiveModel>(decode_records::<user::Model>("user", records)?)).await,
        "hosts" => insert_all(db, resource, active::<_, host::ActiveModel>(decode_records::<host::Model>("host", records)?)).await,
        "properties" => {
            insert_all(db, resource, active::<_, property::ActiveModel>(decode_records::<property::Model>("property", records)?)).await
        }
        "amenities" => {
            insert_all(db, resource, active::<_, amenity::ActiveModel>(decode_records::<amenity::Model>("amenity", records)?)).await
        }
        "bookings" => {
            insert_all(db, resource, active::<_, booking::ActiveModel>(decode_records::<booking::Model>("booking", records)?)).await
        }
        "reviews" => {
            insert_all(db, resource, active::<_, review::ActiveModel>(decode_records::<review::Model>("review", records)?)).await
        }
        _ => Ok(0),
    }
}

/// Delete every row, then insert every stored record.
///
/// Unlike the HTTP layer, unreadable collections abort the run.
#[instrument(skip_all)]
pub async fn run(db: &DatabaseConnection, store: Arc<dyn CollectionStore>) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for spec in RESOURCES.iter().rev() {
        let n = clear(db, spec.name).await?;
        info!(resource = spec.name, rows = n, "seed_cleared");
        report.deleted.push((spec.name, n));
    }

    for spec in RESOURCES.iter() {
        let records = store.load(spec.name).await?;
        let n = fill(db, spec.name, records).await?;
        info!(resource = spec.name, rows = n, "seed_inserted");
        report.inserted.push((spec.name, n));
    }

    info!(total = report.inserted_total(), "Data successfully seeded");
    Ok(report)
}
