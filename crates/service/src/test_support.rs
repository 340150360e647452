#![cfg(test)]
use std::path::PathBuf;

use serde_json::Value;
use uuid::Uuid;

use crate::storage::Record;

/// Fresh, not-yet-created directory under the system temp dir.
pub fn temp_data_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}_{}", Uuid::new_v4()))
}

/// Unwrap a `json!({...})` literal into a record.
pub fn record(v: Value) -> Record {
    match v {
        Value::Object(m) => m,
        other => panic!("expected a json object, got {other}"),
    }
}
