use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Login attempt for {0} failed")]
    Unauthorized(String),
    #[error("token error: {0}")]
    TokenError(String),
}
