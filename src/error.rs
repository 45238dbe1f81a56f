//! Error types for Lead SMS.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Webhook error: {0}")]
    Webhook(#[from] WebhookError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A submission lacked one or more required fields.
///
/// Malformed and missing values look the same here: both are absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Incomplete lead fields: {}", .missing.join(", "))]
pub struct IncompleteFieldsError {
    pub missing: Vec<&'static str>,
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Outbound SMS gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

/// Errors that abort a webhook request.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    #[error("Failed to store lead: {0}")]
    Store(#[from] DatabaseError),
}

impl WebhookError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            WebhookError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "status": "error",
            "error": self.to_string(),
        }));
        (self.status_code(), body).into_response()
    }
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
