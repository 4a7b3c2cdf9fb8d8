use serde::{Deserialize, Serialize};

use crate::oauth2::{PendingState, Profile};

/// Everything the application keeps in the signed session cookie
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Authenticated identity, present only after a successful callback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Profile>,
    /// Anti-forgery state of a login that has not called back yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_state: Option<PendingState>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.oauth_state.is_none()
    }
}

/// Signed payload: the session data plus its absolute expiry (Unix seconds)
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct SessionEnvelope {
    pub(super) data: SessionData,
    pub(super) expires_at: i64,
}
