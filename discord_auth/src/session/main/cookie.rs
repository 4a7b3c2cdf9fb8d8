use headers::{Cookie, HeaderMapExt};
use http::HeaderMap;

use crate::session::config::SessionConfig;
use crate::session::errors::SessionError;
use crate::session::types::SessionData;
use crate::utils::header_set_cookie;

use super::codec::SessionCodec;

/// Cookie-backed session store.
///
/// Reads the session out of request headers and produces the `Set-Cookie`
/// headers that persist it. Holds no per-browser state of its own.
#[derive(Debug, Clone)]
pub struct SessionStore {
    config: SessionConfig,
    codec: SessionCodec,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        let codec = SessionCodec::new(config.secret.clone(), config.max_age);
        Self { config, codec }
    }

    /// Raw session cookie value from the request, if any
    pub fn get_session_cookie_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        let Some(cookies) = headers.typed_get::<Cookie>() else {
            tracing::trace!("No cookie header found");
            return None;
        };
        cookies.get(&self.config.cookie_name).map(str::to_string)
    }

    /// Decodes the session carried by the request.
    pub fn try_load(&self, headers: &HeaderMap) -> Result<Option<SessionData>, SessionError> {
        match self.get_session_cookie_from_headers(headers) {
            Some(value) => self.codec.decode(&value).map(Some),
            None => Ok(None),
        }
    }

    /// Like [`SessionStore::try_load`], but an unreadable cookie is an
    /// anonymous session rather than an error.
    pub fn load(&self, headers: &HeaderMap) -> SessionData {
        match self.try_load(headers) {
            Ok(Some(data)) => data,
            Ok(None) => SessionData::default(),
            Err(e) => {
                tracing::warn!("Ignoring unusable session cookie: {}", e);
                SessionData::default()
            }
        }
    }

    /// `Set-Cookie` headers persisting `data`. An empty session expires the cookie.
    pub fn store(&self, data: &SessionData) -> Result<HeaderMap, SessionError> {
        let mut headers = HeaderMap::new();
        if data.is_empty() {
            header_set_cookie(&mut headers, &self.config.cookie_name, "", 0, self.config.secure)?;
            return Ok(headers);
        }

        let value = self.codec.encode(data)?;
        if value.len() > 4000 {
            tracing::warn!(
                "Session cookie is {} bytes; browsers may drop cookies over 4096 bytes",
                value.len()
            );
        }
        let max_age = i64::try_from(self.config.max_age).unwrap_or(i64::MAX);
        header_set_cookie(
            &mut headers,
            &self.config.cookie_name,
            &value,
            max_age,
            self.config.secure,
        )?;
        Ok(headers)
    }
}
