use thiserror::Error;

#[derive(Debug, Error)]
pub enum FincalcError {
    /// A request was rejected by its validator. Carries every message the
    /// validator produced, in order.
    #[error("invalid request: {}", .0.join("; "))]
    InvalidRequest(Vec<String>),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FincalcError {
    fn from(e: serde_json::Error) -> Self {
        FincalcError::Serialization(e.to_string())
    }
}
