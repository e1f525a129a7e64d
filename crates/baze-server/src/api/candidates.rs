use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use baze_core::Verdict;
use baze_review::{record_status, review_candidates, CandidatesPayload, Decision};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_airtable_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CandidatesQuery {
    pub recruiter: Option<String>,
    /// Process display id or record id; `all` disables the process filter.
    pub processo_res: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct DecisionRecorded {
    record_id: String,
    verdict: Verdict,
    status: String,
}

pub(super) async fn list_candidates(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CandidatesQuery>,
) -> Result<Json<ApiResponse<CandidatesPayload>>, ApiError> {
    let payload = review_candidates(
        &state.airtable,
        &state.settings,
        query.recruiter.as_deref(),
        query.processo_res.as_deref(),
    )
    .await
    .map_err(|e| map_airtable_error(req_id.0.clone(), &e))?;
    Ok(ApiResponse::new(req_id, payload))
}

pub(super) async fn record_decision(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(record_id): Path<String>,
    Json(decision): Json<Decision>,
) -> Result<Json<ApiResponse<DecisionRecorded>>, ApiError> {
    let record_id = record_id.trim().to_string();
    if record_id.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "record id must not be empty",
        ));
    }

    record_status(&state.airtable, &state.settings, &record_id, decision.verdict)
        .await
        .map_err(|e| map_airtable_error(req_id.0.clone(), &e))?;

    tracing::info!(
        record_id = %record_id,
        verdict = %decision.verdict,
        flags = ?decision.flags.as_slice(),
        "decision recorded"
    );

    Ok(ApiResponse::new(
        req_id,
        DecisionRecorded {
            record_id,
            verdict: decision.verdict,
            status: decision.verdict.target_status().label().to_string(),
        },
    ))
}
