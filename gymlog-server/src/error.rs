use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gymlog::TrackerError;
use gymlog::auth::AuthError;
use log::error;
use serde_json::json;

/// Client-facing failure: a status code and a `{"message": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!("Internal error: {}", detail);
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

fn auth_status(err: &AuthError) -> Option<StatusCode> {
    match err {
        AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::ExpiredToken => {
            Some(StatusCode::UNAUTHORIZED)
        }
        AuthError::InvalidToken(_) => Some(StatusCode::UNPROCESSABLE_ENTITY),
        AuthError::EmptySecret | AuthError::Hashing(_) => None,
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        let status = match &err {
            TrackerError::Validation(_) => StatusCode::BAD_REQUEST,
            TrackerError::Auth(auth) => match auth_status(auth) {
                Some(status) => status,
                None => return ApiError::internal(&err),
            },
            TrackerError::Forbidden(_) => StatusCode::FORBIDDEN,
            TrackerError::NotFound(_) => StatusCode::NOT_FOUND,
            TrackerError::Conflict(_) => StatusCode::CONFLICT,
            TrackerError::Deprecated(_) => StatusCode::GONE,
            _ => return ApiError::internal(&err),
        };
        ApiError::new(status, err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::from(TrackerError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let status = |e: TrackerError| ApiError::from(e).status;
        assert_eq!(status(TrackerError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status(AuthError::MissingToken.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(status(AuthError::ExpiredToken.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(AuthError::InvalidToken("bad".into()).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status(TrackerError::access_denied()), StatusCode::FORBIDDEN);
        assert_eq!(status(TrackerError::not_found("Set")), StatusCode::NOT_FOUND);
        assert_eq!(status(TrackerError::conflict("dup")), StatusCode::CONFLICT);
        assert_eq!(
            status(TrackerError::Deprecated("Deprecated: use /api/me".into())),
            StatusCode::GONE
        );
        assert_eq!(
            status(AuthError::EmptySecret.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::internal("disk on fire");
        assert_eq!(err.message, "Internal server error");
    }
}
