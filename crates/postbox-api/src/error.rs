//! Error type shared by every handler.
//!
//! Authorization failures all map to one variant and one status code. The
//! reason string tells the caller what to fix but never which validation
//! step inside the token check failed.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use postbox_types::api::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed request body. The detail is only logged.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "Bad request",
            Self::Unauthorized(reason) => *reason,
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequest(detail) => warn!("Rejected request body: {}", detail),
            Self::Unauthorized(reason) => warn!("Unauthorized: {}", reason),
            Self::Internal(e) => error!(error = ?e, "Internal API error"),
        }

        let body = ErrorBody {
            detail: self.detail().to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_reasons_share_a_status() {
        for reason in ["Invalid token", "Names in the token and in the body do not match"] {
            let response = ApiError::Unauthorized(reason).into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn internal_detail_is_hidden() {
        let err = ApiError::from(anyhow::anyhow!("disk I/O error at /var/lib/postbox.db"));
        assert_eq!(err.detail(), "Internal server error");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_detail_is_generic() {
        let err = ApiError::BadRequest("missing field `name`".into());
        assert_eq!(err.detail(), "Bad request");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
