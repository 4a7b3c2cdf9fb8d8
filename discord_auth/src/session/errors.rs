use thiserror::Error;

use crate::utils::UtilError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("Malformed session cookie")]
    Malformed,

    #[error("Session cookie signature mismatch")]
    BadSignature,

    #[error("Session expired")]
    Expired,

    #[error("Serde error: {0}")]
    Serde(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
