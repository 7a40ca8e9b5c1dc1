//! Request error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mb_store::StoreError;

/// Error returned by request handlers.
///
/// Resolution outcomes are not errors: `NotFound` intents are rendered as a
/// 404 page by the handlers themselves. This type covers the failures behind
/// the resolver: the data store and the blocking-task plumbing.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Data store query failed.
    #[error("store query failed: {0}")]
    Store(#[from] StoreError),
    /// Blocking query task was cancelled or panicked.
    #[error("query task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Store(_) => StatusCode::BAD_GATEWAY,
            Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(error = %self, "Request failed");
        (status, "El servicio no está disponible por el momento.").into_response()
    }
}
