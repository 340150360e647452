use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot decode {entity} record {id}: {reason}")]
    Decode { entity: &'static str, id: String, reason: String },
}
