//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chai_docs::{ContentError, PathError};
use chai_exercises::ExerciseError;
use chai_styles::StyleError;
use serde_json::json;

use crate::templates::TemplateError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No page exists at the requested path.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// The request path names no position in its group.
    #[error("Page not found: {0}")]
    Path(#[from] PathError),

    /// Content could not be loaded.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Stylesheet could not be served.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Exercise could not be served.
    #[error(transparent)]
    Exercise(#[from] ExerciseError),

    /// Page template failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A blocking task panicked or was cancelled.
    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    /// HTTP status for the error.
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::PageNotFound(_) | Self::Path(_) => StatusCode::NOT_FOUND,
            Self::Content(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            Self::Style(StyleError::InvalidPath(_)) => StatusCode::BAD_REQUEST,
            Self::Style(StyleError::SourceNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Exercise(ExerciseError::MissingLabel | ExerciseError::InvalidLabel(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Exercise(ExerciseError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Exercise(ExerciseError::Upstream { .. }) => StatusCode::BAD_GATEWAY,
            Self::Content(_)
            | Self::Style(_)
            | Self::Exercise(_)
            | Self::Template(_)
            | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
