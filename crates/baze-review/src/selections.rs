use baze_airtable::fields::{scalar_text, text};
use baze_airtable::{AirtableClient, AirtableError, AirtableRecord, Formula, ListParams};
use serde::Serialize;
use serde_json::Value;

use crate::profile::WORKER_ID_ALIASES;
use crate::settings::ReviewSettings;

/// One process a worker has been selected for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerSelection {
    pub id: String,
    pub process_id: Option<String>,
    pub process_title: Option<String>,
    pub process_status: Option<String>,
    pub recruiter_id: Option<String>,
}

impl WorkerSelection {
    fn from_record(record: &AirtableRecord) -> Self {
        let fields = &record.fields;
        Self {
            id: record.id.clone(),
            process_id: text(fields, "processo_res"),
            process_title: text(fields, "processo_title").and_then(|t| trim_process_title(&t)),
            process_status: text(fields, "stato_processo_res"),
            recruiter_id: text(fields, "recruiter_processo_res"),
        }
    }
}

/// Drops the trailing segment of a `a | b | c` title. Single-segment titles
/// are returned trimmed.
fn trim_process_title(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw
        .split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    match parts.as_slice() {
        [] => None,
        [single] => Some((*single).to_string()),
        [head @ .., _] => Some(head.join(" | ")),
    }
}

/// Whether any worker-id alias of `record` equals `worker_id`, ignoring case.
fn references_worker(record: &AirtableRecord, worker_id: &str) -> bool {
    let wanted = worker_id.to_lowercase();
    WORKER_ID_ALIASES.iter().any(|alias| {
        let values: Vec<String> = match record.fields.get(*alias) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
            Some(value) => scalar_text(value).into_iter().collect(),
            None => Vec::new(),
        };
        values.iter().any(|v| v.to_lowercase() == wanted)
    })
}

/// Lists every profile row that references `worker_id`.
///
/// When `field` names a worker-id alias the listing is filtered server-side;
/// if that filtered request is rejected, one unfiltered listing is made
/// instead. Rows are always re-checked locally.
///
/// # Errors
///
/// Returns [`AirtableError`] if the (final) listing fails.
pub async fn fetch_worker_selections(
    client: &AirtableClient,
    settings: &ReviewSettings,
    worker_id: &str,
    field: Option<&str>,
) -> Result<Vec<WorkerSelection>, AirtableError> {
    let unfiltered = ListParams::new().view(settings.profiles_view.clone());

    let filter_field = field.filter(|f| WORKER_ID_ALIASES.contains(f));
    if let (Some(requested), None) = (field, filter_field) {
        tracing::warn!(field = requested, "ignoring unknown worker id field");
    }

    let records = match filter_field {
        Some(f) => {
            let params = unfiltered.clone().filter(Formula::find_in(worker_id, f));
            match client.list_records(&settings.profiles_table, &params).await {
                Ok(records) => records,
                Err(e @ AirtableError::ExternalApi { .. }) => {
                    tracing::warn!(error = %e, "filtered selection lookup failed, listing all");
                    client
                        .list_records(&settings.profiles_table, &unfiltered)
                        .await?
                }
                Err(e) => return Err(e),
            }
        }
        None => {
            client
                .list_records(&settings.profiles_table, &unfiltered)
                .await?
        }
    };

    Ok(records
        .iter()
        .filter(|record| references_worker(record, worker_id))
        .map(WorkerSelection::from_record)
        .collect())
}
