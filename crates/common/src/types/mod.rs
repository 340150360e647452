use serde::{Deserialize, Serialize};

/// Body shape used for every non-record JSON answer (`{"message": ...}`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Plain-text liveness answer for `GET /`.
pub const LIVENESS_TEXT: &str = "Server is working";
