use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
}

impl ServiceError {
    pub fn not_found(label: &'static str) -> Self { Self::NotFound(label) }
}
