use axum::{extract::State, Extension, Json};
use baze_review::{fetch_directory, RecruiterDirectory};

use crate::middleware::RequestId;

use super::{map_airtable_error, ApiError, ApiResponse, AppState};

pub(super) async fn list_processes(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<RecruiterDirectory>>, ApiError> {
    let directory = fetch_directory(&state.airtable, &state.settings)
        .await
        .map_err(|e| map_airtable_error(req_id.0.clone(), &e))?;
    Ok(ApiResponse::new(req_id, directory))
}
