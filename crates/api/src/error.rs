use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sagashelf_core::error::CoreError;
use sagashelf_sgdb::SgdbError;
use sagashelf_store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain and client errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sagashelf_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A SteamGridDB failure outside the raw proxy routes.
    #[error(transparent)]
    Sgdb(#[from] SgdbError),

    /// A raw proxy call that could not reach SteamGridDB.
    #[error("Proxy error ({route}): {source}")]
    Proxy {
        route: &'static str,
        source: SgdbError,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A dependency that is not configured.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type ErrorParts = (StatusCode, &'static str, String);

fn internal(err: &dyn std::fmt::Display) -> ErrorParts {
    tracing::error!(error = %err, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core(err: &CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, key } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} '{key}' not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
    }
}

/// - Upstream 404 stays a 404.
/// - Other upstream or transport failures become 502.
fn classify_store(err: &StoreError) -> ErrorParts {
    match err {
        StoreError::Core(core) => classify_core(core),
        StoreError::Api { status: 404, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        StoreError::Api { status, body } => {
            tracing::warn!(status, body = %body, "Record store rejected request");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The record store rejected the request".to_string(),
            )
        }
        StoreError::Request(e) => {
            tracing::error!(error = %e, "Record store unreachable");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The record store is unreachable".to_string(),
            )
        }
    }
}

fn classify_sgdb(err: &SgdbError) -> ErrorParts {
    match err {
        SgdbError::MissingApiKey => (
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            err.to_string(),
        ),
        SgdbError::Api { status, .. } => {
            tracing::warn!(status, "SteamGridDB rejected request");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                format!("SteamGridDB returned status {status}"),
            )
        }
        SgdbError::Request(e) => {
            tracing::error!(error = %e, "SteamGridDB unreachable");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "SteamGridDB is unreachable".to_string(),
            )
        }
        SgdbError::InvalidBaseUrl { .. } => internal(err),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core(core),
            AppError::Store(err) => classify_store(err),
            AppError::Sgdb(err) => classify_sgdb(err),

            AppError::Proxy {
                source: SgdbError::MissingApiKey,
                ..
            } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                SgdbError::MissingApiKey.to_string(),
            ),
            AppError::Proxy { route, source } => {
                tracing::error!(route, error = %source, "Proxy request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PROXY_ERROR",
                    format!("Proxy error ({route})"),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
