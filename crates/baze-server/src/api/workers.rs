use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use baze_review::{fetch_worker_selections, WorkerSelection};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_airtable_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SelectionsQuery {
    /// Worker-id column to filter on server-side.
    pub field: Option<String>,
}

pub(super) async fn list_selections(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(worker_id): Path<String>,
    Query(query): Query<SelectionsQuery>,
) -> Result<Json<ApiResponse<Vec<WorkerSelection>>>, ApiError> {
    let worker_id = worker_id.trim();
    if worker_id.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "worker id must not be empty",
        ));
    }

    let selections = fetch_worker_selections(
        &state.airtable,
        &state.settings,
        worker_id,
        query.field.as_deref(),
    )
    .await
    .map_err(|e| map_airtable_error(req_id.0.clone(), &e))?;
    Ok(ApiResponse::new(req_id, selections))
}
