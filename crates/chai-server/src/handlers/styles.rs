//! On-demand stylesheets.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /static/scss/{*file}.
pub(crate) async fn get_stylesheet(
    Path(file): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let sheet = state.styles.stylesheet(&file)?;
    if sheet.compiled {
        tracing::info!(file = %file, "Compiled stylesheet");
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        sheet.css,
    ))
}
