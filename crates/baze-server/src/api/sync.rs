use axum::{extract::State, Extension, Json};
use baze_review::{SyncCandidate, SyncReport};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SyncRequest {
    #[serde(default)]
    pub candidates: Vec<SyncCandidate>,
}

/// Per-candidate failures are reported in the body, never as a request error.
pub(super) async fn sync_candidates(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<SyncRequest>,
) -> Json<ApiResponse<SyncReport>> {
    tracing::info!(count = request.candidates.len(), "syncing candidates");
    let report =
        baze_review::sync_candidates(&state.airtable, &state.settings, &request.candidates).await;
    ApiResponse::new(req_id, report)
}
