use crate::utils::UtilError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OAuth2Error {
    #[error("No pending state in session")]
    StateMissing,

    #[error("State mismatch")]
    StateMismatch,

    #[error("State expired")]
    StateExpired,

    #[error("Provider denied authorization: {error}")]
    ProviderDenied {
        error: String,
        description: Option<String>,
    },

    #[error("Authorization code missing from callback")]
    MissingCode,

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Fetch profile error: {0}")]
    FetchProfile(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Url error: {0}")]
    Url(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl OAuth2Error {
    /// Failures of the callback validation or the code-for-token exchange
    pub fn is_exchange(&self) -> bool {
        matches!(
            self,
            Self::StateMissing
                | Self::StateMismatch
                | Self::StateExpired
                | Self::ProviderDenied { .. }
                | Self::MissingCode
                | Self::TokenExchange(_)
        )
    }

    /// Failures of the user-info request
    pub fn is_profile_fetch(&self) -> bool {
        matches!(self, Self::FetchProfile(_) | Self::InvalidProfile(_))
    }
}
