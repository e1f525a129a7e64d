//! Bulk push of candidate rows into the `Candidates` table.

use baze_airtable::AirtableClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::settings::ReviewSettings;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SyncCandidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl SyncCandidate {
    fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("Name".into(), json!(self.name));
        fields.insert("Email".into(), json!(self.email));
        fields.insert("Role".into(), json!(self.role));
        fields.insert("Status".into(), json!(self.status));
        fields.insert("Phone".into(), json!(self.phone.as_deref().unwrap_or("")));
        fields.insert(
            "Location".into(),
            json!(self.location.as_deref().unwrap_or("")),
        );
        fields.insert(
            "LinkedIn".into(),
            json!(self.linkedin_url.as_deref().unwrap_or("")),
        );
        fields.insert(
            "Experience Years".into(),
            json!(self.experience_years.unwrap_or(0.0)),
        );
        fields.insert("Skills".into(), json!(self.skills.join(", ")));
        fields.insert("Candidate ID".into(), json!(self.id));
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub message: String,
    pub results: Vec<SyncOutcome>,
}

/// Creates one record per candidate. A failed candidate is reported and does
/// not stop the rest.
pub async fn sync_candidates(
    client: &AirtableClient,
    settings: &ReviewSettings,
    candidates: &[SyncCandidate],
) -> SyncReport {
    let mut results = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match client
            .create_record(&settings.sync_table, candidate.to_fields())
            .await
        {
            Ok(_) => results.push(SyncOutcome {
                id: candidate.id.clone(),
                success: true,
                error: None,
            }),
            Err(e) => {
                tracing::error!(candidate_id = %candidate.id, error = %e, "candidate sync failed");
                results.push(SyncOutcome {
                    id: candidate.id.clone(),
                    success: false,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let synced = results.iter().filter(|r| r.success).count();
    tracing::info!(synced, total = candidates.len(), "candidate sync finished");
    SyncReport {
        message: format!("Synced {synced} of {} candidates", candidates.len()),
        results,
    }
}
