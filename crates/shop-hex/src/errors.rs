use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use shop_types::ports::RepoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Persistence(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Authorization(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// The closed set of failure kinds the API can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    ResourceNotFound,
    ResourcePersistence,
    Authentication,
    Authorization,
    Internal,
}

impl ErrorKind {
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Invalid parameters provided.",
            ErrorKind::ResourceNotFound => "No resource found using provided parameters.",
            ErrorKind::ResourcePersistence => "The resource was not persisted.",
            ErrorKind::Authentication => "Authentication failed.",
            ErrorKind::Authorization => "Unauthorized to access this resource.",
            ErrorKind::Internal => "internal error",
        }
    }
}

/// Transport mapping for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::ResourceNotFound => StatusCode::NOT_FOUND,
        ErrorKind::ResourcePersistence => StatusCode::CONFLICT,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::BadRequest(_) => ErrorKind::BadRequest,
            AppError::NotFound(_) => ErrorKind::ResourceNotFound,
            AppError::Persistence(_) => ErrorKind::ResourcePersistence,
            AppError::Authentication(_) => ErrorKind::Authentication,
            AppError::Authorization(_) => ErrorKind::Authorization,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn bad_request() -> Self {
        AppError::BadRequest(ErrorKind::BadRequest.default_message().into())
    }

    pub fn not_found() -> Self {
        AppError::NotFound(ErrorKind::ResourceNotFound.default_message().into())
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        AppError::Internal(anyhow::anyhow!(e.to_string()))
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let msg = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "request failed");
                kind.default_message().to_string()
            }
            other => other.to_string(),
        };

        let body = serde_json::to_string(&ErrorBody { error: msg })
            .unwrap_or_else(|_| "{\"error\":\"internal serialization\"}".into());
        (
            status_for(kind),
            [("content-type", "application/json")],
            body,
        )
            .into_response()
    }
}
