use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlendError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Authentication failed. {0}")]
    AuthError(String),
    #[error("HTTP error occurred: {status} - Response: {body}")]
    HttpError {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("{0}")]
    ResponseError(String),
    #[error("An unexpected error occurred: {0}")]
    RequestError(String),
    #[error("{0}")]
    InternalError(String),
}

impl BlendError {
    /// Message placed in the `error` field of the JSON response body.
    pub fn client_message(&self) -> String {
        match self {
            BlendError::ValidationError(msg) => msg.clone(),
            BlendError::InternalError(msg) => {
                format!("An internal server error occurred: {}", msg)
            }
            other => format!("Image generation failed. Details: {}", other),
        }
    }
}

impl ResponseError for BlendError {
    fn status_code(&self) -> StatusCode {
        match self {
            BlendError::ValidationError(_) => StatusCode::BAD_REQUEST,
            // Auth failures surface as 500, not 401/403: clients depend on it.
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.client_message() }))
    }
}

pub type Result<T> = std::result::Result<T, BlendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = BlendError::ValidationError("Gender must be one of 'male', 'female', 'boy', or 'girl'".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.client_message(),
            "Gender must be one of 'male', 'female', 'boy', or 'girl'"
        );
    }

    #[test]
    fn test_auth_failure_maps_to_internal_server_error() {
        let err = BlendError::AuthError("Could not get auth token.".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.client_message(),
            "Image generation failed. Details: Authentication failed. Could not get auth token."
        );
    }

    #[test]
    fn test_http_error_echoes_status_and_body() {
        let err = BlendError::HttpError {
            status: reqwest::StatusCode::FORBIDDEN,
            body: "{\"error\":\"denied\"}".into(),
        };
        let msg = err.client_message();
        assert!(msg.contains("403 Forbidden"));
        assert!(msg.contains("{\"error\":\"denied\"}"));
    }

    #[test]
    fn test_internal_error_message() {
        let err = BlendError::InternalError("stream closed".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.client_message(),
            "An internal server error occurred: stream closed"
        );
    }
}
