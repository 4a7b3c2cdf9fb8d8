//! Error types for the coordination layer

use thiserror::Error;

use crate::config::ConfigError;
use crate::oauth2::OAuth2Error;
use crate::session::SessionError;
use crate::utils::UtilError;

/// Errors that can occur while coordinating the login flow
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinationError {
    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(ConfigError),

    /// Error from OAuth2 operations
    #[error("OAuth2 error: {0}")]
    OAuth2Error(OAuth2Error),

    /// Error from Session operations
    #[error("Session error: {0}")]
    SessionError(SessionError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    UtilsError(UtilError),
}

impl CoordinationError {
    /// Log the error and return self
    ///
    /// This method logs the error with appropriate context and returns self,
    /// allowing for method chaining and explicit logging when needed.
    pub fn log(self) -> Self {
        match &self {
            Self::Config(err) => tracing::error!("Configuration error: {}", err),
            Self::OAuth2Error(err) => tracing::error!("OAuth2 error: {}", err),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
            Self::UtilsError(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }
}

impl From<ConfigError> for CoordinationError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<OAuth2Error> for CoordinationError {
    fn from(err: OAuth2Error) -> Self {
        Self::OAuth2Error(err)
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        Self::SessionError(err)
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        Self::UtilsError(err)
    }
}
