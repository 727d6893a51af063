// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::api::FieldErrors;
use crate::services::ServiceError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: FieldErrors,
    },
    InvalidJson(String),
    IdMismatch {
        path: i64,
        body: Option<i64>,
    },

    // 404 Not Found (sent without a body)
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError {
        message: String,
        error: String,
    },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::IdMismatch { .. } => 400,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError { .. } => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::IdMismatch { .. } => "ID mismatch",
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError { message, .. } => message,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError {
                message,
                field_errors,
            } => json!({
                "message": message,
                "code": self.error_code(),
                "field_errors": field_errors
            }),
            ApiError::InternalServerError { message, error } => json!({
                "message": message,
                "code": self.error_code(),
                "error": error
            }),
            _ => json!({
                "message": self.message(),
                "code": self.error_code()
            }),
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::IdMismatch { .. } => "ID_MISMATCH",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError { .. } => "INTERNAL_SERVER_ERROR",
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            message: message.into(),
            error: error.into(),
        }
    }

    /// Map a service failure. `context` becomes the message of a 500,
    /// e.g. "Error creating product".
    pub fn from_service(err: ServiceError, context: impl Into<String>) -> Self {
        match err {
            ServiceError::Validation(field_errors) => {
                ApiError::validation_error("One or more validation errors occurred", field_errors)
            }
            ServiceError::IdMismatch { path, body } => ApiError::IdMismatch { path, body },
            ServiceError::Database(db_err) => {
                let context = context.into();
                tracing::error!("{}: {}", context, db_err);
                ApiError::internal_server_error(context, db_err.to_string())
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if let ApiError::NotFound(msg) = &self {
            tracing::debug!("{}", msg);
            return status.into_response();
        }
        if let ApiError::IdMismatch { path, body } = &self {
            tracing::debug!("ID mismatch: path {} body {:?}", path, body);
        }

        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseError;

    #[test]
    fn validation_error_lists_fields() {
        let mut fields = FieldErrors::new();
        fields.insert("name".to_string(), "This field is required".to_string());
        let err = ApiError::from_service(ServiceError::Validation(fields), "Error creating store");

        assert_eq!(err.status_code(), 400);
        let body = err.to_json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field_errors"]["name"], "This field is required");
    }

    #[test]
    fn id_mismatch_is_a_bad_request() {
        let err = ApiError::from_service(
            ServiceError::IdMismatch { path: 1, body: Some(2) },
            "Error updating product",
        );
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_json()["message"], "ID mismatch");
    }

    #[test]
    fn database_failures_carry_context_and_description() {
        let err = ApiError::from_service(
            ServiceError::Database(DatabaseError::QueryError("disk I/O error".to_string())),
            "Error creating product",
        );
        assert_eq!(err.status_code(), 500);
        let body = err.to_json();
        assert_eq!(body["message"], "Error creating product");
        assert_eq!(body["error"], "Query error: disk I/O error");
    }

    #[test]
    fn not_found_has_no_body() {
        let response = ApiError::not_found("product 42 not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(axum::http::header::CONTENT_TYPE).is_none());
    }
}
