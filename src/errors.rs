use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use crate::store::StoreError;

#[derive(Debug)]
pub enum AppError {
    /// A save-family store operation failed; `action` names it for the client.
    Store { action: &'static str, source: StoreError },
    Upload(std::io::Error),
    Session(String),
    BadRequest(String),
    Unauthorized,
    TooManyAttempts,
}

impl AppError {
    pub fn store(action: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store { action, source }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Store { action, source } => write!(f, "Failed to {action}: {source}"),
            AppError::Upload(e) => write!(f, "Upload error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::BadRequest(e) => write!(f, "Bad request: {e}"),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::TooManyAttempts => write!(f, "Too many attempts"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Store { action, .. } => format!("Failed to {action}"),
            AppError::Upload(_) => "Failed to upload file".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::TooManyAttempts => {
                "Too many failed login attempts. Please try again later.".to_string()
            }
            AppError::Session(_) => "Internal Server Error".to_string(),
        };
        if self.status_code().is_server_error() {
            log::error!("{self}");
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

impl From<actix_session::SessionInsertError> for AppError {
    fn from(e: actix_session::SessionInsertError) -> Self {
        AppError::Session(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn store_errors_map_to_500_with_action() {
        let err = AppError::store("save content")(StoreError::Write {
            target: "data/storage.json".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Failed to save content"));
    }

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::TooManyAttempts.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }
}
