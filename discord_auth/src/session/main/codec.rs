//! Signed cookie codec
//!
//! A session cookie value is `<payload>.<signature>` where `payload` is the
//! base64url JSON envelope and `signature` is base64url HMAC-SHA256 over the
//! payload text. Nothing is parsed before the signature checks out.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::session::errors::SessionError;
use crate::session::types::{SessionData, SessionEnvelope};
use crate::utils::{base64url_decode, base64url_encode};

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SessionCodec {
    secret: Vec<u8>,
    max_age: u64,
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCodec")
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

impl SessionCodec {
    pub fn new(secret: impl Into<Vec<u8>>, max_age: u64) -> Self {
        Self {
            secret: secret.into(),
            max_age,
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }

    pub fn encode(&self, data: &SessionData) -> Result<String, SessionError> {
        let max_age = i64::try_from(self.max_age).unwrap_or(i64::MAX);
        let envelope = SessionEnvelope {
            data: data.clone(),
            expires_at: Utc::now().timestamp().saturating_add(max_age),
        };
        let json =
            serde_json::to_vec(&envelope).map_err(|e| SessionError::Serde(e.to_string()))?;
        let payload = base64url_encode(json);

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let signature = base64url_encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }

    pub fn decode(&self, value: &str) -> Result<SessionData, SessionError> {
        let (payload, signature) = value.split_once('.').ok_or(SessionError::Malformed)?;
        let signature = base64url_decode(signature).map_err(|_| SessionError::Malformed)?;

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionError::BadSignature)?;

        let json = base64url_decode(payload).map_err(|_| SessionError::Malformed)?;
        let envelope: SessionEnvelope =
            serde_json::from_slice(&json).map_err(|e| SessionError::Serde(e.to_string()))?;

        if Utc::now().timestamp() > envelope.expires_at {
            return Err(SessionError::Expired);
        }
        Ok(envelope.data)
    }
}
