use auction_insights::AuctionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Unified error type that renders as a JSON `{"error": "...", "field": "..."}`
/// response with an appropriate HTTP status code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub field: Option<String>,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
            field: None,
        }
    }

    /// Input failed validation; `field` names the offending parameter.
    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.into(),
            field: None,
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
            field: None,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
            field: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "request failed");
        }
        let body = match &self.field {
            Some(field) => json!({ "error": self.message, "field": field }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AuctionError> for AppError {
    fn from(e: AuctionError) -> Self {
        match e {
            AuctionError::Validation { field, message } => AppError::invalid_field(field, message),
            AuctionError::Upstream(_) | AuctionError::Http(_) => AppError::bad_gateway(e.to_string()),
            other => AppError::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_are_server_errors() {
        let err = AppError::from(AuctionError::DuckDb(duckdb::Error::QueryReturnedNoRows));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_keeps_the_field() {
        let err = AppError::from(AuctionError::validation("limit", "too large"));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.field.as_deref(), Some("limit"));
    }

    #[test]
    fn runtime_failures_are_server_errors() {
        let err = AppError::from(AuctionError::Runtime("Task join error".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn provider_failures_are_bad_gateway() {
        let err = AppError::from(AuctionError::Upstream("503".to_string()));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }
}
