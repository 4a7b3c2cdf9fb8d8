use axum::{body::Body, response::Response};
use http::{Result as HttpResponse, StatusCode, header::LOCATION};

use discord_auth::{CoordinationError, OAuth2Error};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Implementation for CoordinationError to map variants to appropriate status codes
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match &e {
                CoordinationError::OAuth2Error(err) if err.is_exchange() => StatusCode::BAD_REQUEST,
                CoordinationError::OAuth2Error(OAuth2Error::FetchProfile(_))
                | CoordinationError::OAuth2Error(OAuth2Error::InvalidProfile(_)) => {
                    StatusCode::BAD_GATEWAY
                }
                CoordinationError::SessionError(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}

/// Implementation for http::Error (used by Response::builder())
impl<T> IntoResponseError<T> for HttpResponse<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}

/// `302 Found` redirect
pub(crate) fn found(location: &str) -> Result<Response, (StatusCode, String)> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location)
        .body(Body::empty())
        .into_response_error()
}
