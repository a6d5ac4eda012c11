//! Guide exercise API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use chai_exercises::ExerciseService;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ServerError;
use crate::state::AppState;

/// Query string of GET /api/guide/exercise.
#[derive(Debug, Deserialize)]
pub(crate) struct ExerciseQuery {
    label: Option<String>,
}

/// Handle GET /api/guide/exercise?label=<section>.<exercise>.
///
/// The solution fetch blocks, so the lookup runs on the blocking pool.
pub(crate) async fn get_exercise(
    Query(query): Query<ExerciseQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ServerError> {
    let label = ExerciseService::parse_label(query.label.as_deref())?;

    let exercise =
        tokio::task::spawn_blocking(move || state.exercises.exercise(label)).await??;
    Ok(Json(exercise))
}
