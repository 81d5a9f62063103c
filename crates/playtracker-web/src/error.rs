use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use playtracker_common::Error;
use tracing::{error, warn};

/// Handler error. Carries only a status to the client; the underlying error
/// is logged here and the body is filled in by the error-page layer.
#[derive(Debug)]
pub struct WebError(pub Error);

impl WebError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for WebError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_client_error() {
            warn!(status = status.as_u16(), "request rejected: {}", self.0);
        } else {
            error!(status = status.as_u16(), "request failed: {}", self.0);
        }
        status.into_response()
    }
}

pub type WebResult<T> = std::result::Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (Error::Validation("bad date".into()), StatusCode::BAD_REQUEST),
            (Error::NotFound("play 9".into()), StatusCode::NOT_FOUND),
            (Error::Database("locked".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Template("missing".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(WebError::from(err).into_response().status(), expected);
        }
    }
}
