use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

/// Structural problems with a submitted URL or a fetched body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("URL cannot be empty")]
    EmptyInput,

    #[error("invalid URL format: {0}")]
    MalformedUrl(String),

    #[error("URL must include scheme (http or https)")]
    MissingScheme,

    #[error("URL scheme must be http or https")]
    UnsupportedScheme(String),

    #[error("URL must include host")]
    MissingHost,

    #[error("response body is empty")]
    EmptyBody,

    #[error("invalid JSON format: {0}")]
    MalformedJson(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect to database: {0}")]
    ConnectionSetup(#[source] sqlx::Error),

    #[error("failed to migrate database: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("database operation failed: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("record {0} must not be empty")]
    EmptyField(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("link parameter is required")]
    MissingLink,

    #[error("{0}")]
    InvalidUrl(ValidationError),

    #[error("HTTP request failed: {0}")]
    Network(String),

    #[error("HTTP {status}: {status_line}")]
    UpstreamHttp { status: u16, status_line: String },

    #[error("Expected JSON content, got: {0}")]
    NotJsonContentType(String),

    #[error("{0}")]
    InvalidJson(ValidationError),

    #[error("failed to save JSON record: {0}")]
    Save(#[source] StoreError),

    #[error("failed to get JSON records: {0}")]
    List(#[source] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Save(_) | AppError::List(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Human readable summary sent as `message`.
    pub fn message(&self) -> &'static str {
        match self {
            AppError::MissingLink => "Missing required parameter: link",
            AppError::InvalidUrl(_) => "Invalid URL format",
            AppError::Network(_) => "Failed to fetch URL",
            AppError::UpstreamHttp { .. } => "HTTP request failed",
            AppError::NotJsonContentType(_) => "Response is not JSON",
            AppError::InvalidJson(_) => "Invalid JSON response",
            AppError::Save(_) => "Failed to save to database",
            AppError::List(_) => "Failed to retrieve records",
            AppError::Config(_) => "Configuration error",
        }
    }

    /// Machine readable detail sent as `error`. Server side failures are masked.
    pub fn detail(&self) -> String {
        if self.status().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        response::failure(status, self.message(), self.detail()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
