//! Recruiter → process index for the process selector.
//!
//! Operators are joined against processes in the sourcing stage. The index is
//! derived on every fetch and never cached.

use std::collections::{BTreeMap, HashMap};

use baze_airtable::fields::text;
use baze_airtable::{AirtableClient, AirtableError, AirtableRecord, Formula, ListParams};
use baze_core::SOURCING_STAGE;
use serde::Serialize;

use crate::settings::ReviewSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    /// Internal record id of the process.
    pub id: String,
    pub recruiter_id: String,
    pub recruiter_name: String,
    pub job_type: String,
    pub relationship_type: String,
    pub time_of_day: String,
    pub family_email: String,
    /// External identifier shown to recruiters; the record id when unset.
    pub display_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecruiterSummary {
    pub id: String,
    pub name: String,
    /// Process record ids in process iteration order.
    pub process_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecruiterDirectory {
    pub recruiters: Vec<RecruiterSummary>,
    pub processes: BTreeMap<String, ProcessSummary>,
}

impl RecruiterDirectory {
    /// Finds a recruiter by record id, or by display name ignoring case.
    #[must_use]
    pub fn find_recruiter(&self, key: &str) -> Option<&RecruiterSummary> {
        let key = key.trim();
        self.recruiters
            .iter()
            .find(|r| r.id == key)
            .or_else(|| {
                self.recruiters
                    .iter()
                    .find(|r| r.name.eq_ignore_ascii_case(key))
            })
    }

    /// Finds a process by record id, or by its display id.
    #[must_use]
    pub fn find_process(&self, key: &str) -> Option<&ProcessSummary> {
        let key = key.trim();
        self.processes
            .get(key)
            .or_else(|| self.processes.values().find(|p| p.display_id == key))
    }
}

/// Server-side filter for sourcing-stage processes. Tolerates the status
/// appearing inside a multi-valued field.
#[must_use]
pub fn sourcing_formula() -> Formula {
    Formula::any([
        Formula::eq("stato_res", SOURCING_STAGE),
        Formula::find_in(SOURCING_STAGE, "stato_res"),
    ])
}

fn is_sourcing(status: Option<&str>) -> bool {
    status.is_some_and(|s| s.trim().eq_ignore_ascii_case(SOURCING_STAGE))
}

/// Joins operators with processes. Pure: the caller supplies the records.
///
/// A process is kept only when its first `stato_res` value is the sourcing
/// stage, and its recruiter link resolves to a known operator.
#[must_use]
pub fn build_directory(
    operators: &[AirtableRecord],
    processes: &[AirtableRecord],
) -> RecruiterDirectory {
    let operator_names: HashMap<&str, String> = operators
        .iter()
        .filter_map(|op| text(&op.fields, "nome").map(|name| (op.id.as_str(), name)))
        .collect();

    let mut recruiters: Vec<RecruiterSummary> = Vec::new();
    let mut recruiter_index: HashMap<String, usize> = HashMap::new();
    let mut summaries: BTreeMap<String, ProcessSummary> = BTreeMap::new();

    for process in processes {
        let fields = &process.fields;

        let status = text(fields, "stato_res");
        if !is_sourcing(status.as_deref()) {
            tracing::debug!(process_id = %process.id, status = ?status, "skipping process outside sourcing stage");
            continue;
        }

        let Some(recruiter_id) = text(fields, "recruiter_ricerca_e_selezione") else {
            tracing::debug!(process_id = %process.id, "skipping process without recruiter");
            continue;
        };
        let Some(recruiter_name) = operator_names.get(recruiter_id.as_str()) else {
            tracing::debug!(process_id = %process.id, recruiter_id = %recruiter_id, "skipping process with unknown recruiter");
            continue;
        };

        summaries.insert(
            process.id.clone(),
            ProcessSummary {
                id: process.id.clone(),
                recruiter_id: recruiter_id.clone(),
                recruiter_name: recruiter_name.clone(),
                job_type: text(fields, "tipo_lavoro").unwrap_or_default(),
                relationship_type: text(fields, "tipo_rapporto").unwrap_or_default(),
                time_of_day: text(fields, "momento_giornata").unwrap_or_default(),
                family_email: text(fields, "email_famiglia").unwrap_or_default(),
                display_id: text(fields, "record_id_processo")
                    .unwrap_or_else(|| process.id.clone()),
            },
        );

        let slot = *recruiter_index.entry(recruiter_id.clone()).or_insert_with(|| {
            recruiters.push(RecruiterSummary {
                id: recruiter_id.clone(),
                name: recruiter_name.clone(),
                process_ids: Vec::new(),
            });
            recruiters.len() - 1
        });
        recruiters[slot].process_ids.push(process.id.clone());
    }

    recruiters.sort_by_key(|r| r.name.to_lowercase());

    RecruiterDirectory {
        recruiters,
        processes: summaries,
    }
}

/// Fetches operators and sourcing-stage processes, then builds the directory.
///
/// # Errors
///
/// Returns [`AirtableError`] if either listing fails.
pub async fn fetch_directory(
    client: &AirtableClient,
    settings: &ReviewSettings,
) -> Result<RecruiterDirectory, AirtableError> {
    let operators = client
        .list_records(
            &settings.operators_table,
            &ListParams::new().fields(["nome", "record_id"]),
        )
        .await?;

    let processes = client
        .list_records(
            &settings.processes_table,
            &ListParams::new()
                .view(settings.processes_view.clone())
                .filter(sourcing_formula()),
        )
        .await?;

    let directory = build_directory(&operators, &processes);
    tracing::info!(
        operators = operators.len(),
        processes = processes.len(),
        recruiters = directory.recruiters.len(),
        "built recruiter directory"
    );
    Ok(directory)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn record(id: &str, fields: Value) -> AirtableRecord {
        match fields {
            Value::Object(map) => AirtableRecord::new(id, map),
            _ => panic!("fixture must be an object"),
        }
    }

    fn operators() -> Vec<AirtableRecord> {
        vec![
            record("recOpB", json!({ "nome": "Bianca" })),
            record("recOpA", json!({ "nome": ["anna"] })),
            record("recOpX", json!({})),
        ]
    }

    #[test]
    fn sourcing_formula_renders_both_branches() {
        assert_eq!(
            sourcing_formula().to_string(),
            "OR({stato_res}='fare ricerca',FIND('fare ricerca', ARRAYJOIN({stato_res}, ','))>0)"
        );
    }

    #[test]
    fn groups_processes_by_recruiter_in_iteration_order() {
        let processes = vec![
            record(
                "recP1",
                json!({ "stato_res": "fare ricerca", "recruiter_ricerca_e_selezione": ["recOpB"], "record_id_processo": "P1" }),
            ),
            record(
                "recP2",
                json!({ "stato_res": ["fare ricerca"], "recruiter_ricerca_e_selezione": "recOpA" }),
            ),
            record(
                "recP3",
                json!({ "stato_res": "Fare Ricerca ", "recruiter_ricerca_e_selezione": ["recOpB"], "tipo_lavoro": ["Colf"] }),
            ),
        ];

        let dir = build_directory(&operators(), &processes);

        let names: Vec<&str> = dir.recruiters.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["anna", "Bianca"]);
        assert_eq!(dir.recruiters[1].process_ids, vec!["recP1", "recP3"]);
        assert_eq!(dir.processes["recP1"].display_id, "P1");
        assert_eq!(dir.processes["recP2"].display_id, "recP2");
        assert_eq!(dir.processes["recP3"].job_type, "Colf");
        assert_eq!(dir.processes["recP3"].relationship_type, "");
    }

    #[test]
    fn excludes_non_sourcing_and_missing_status() {
        let processes = vec![
            record(
                "recP1",
                json!({ "stato_res": "in selezione", "recruiter_ricerca_e_selezione": "recOpA" }),
            ),
            record(
                "recP2",
                json!({ "stato_res": ["da assegnare", "fare ricerca"], "recruiter_ricerca_e_selezione": "recOpA" }),
            ),
            record(
                "recP3",
                json!({ "stato_res": "fare ricerca avanzata", "recruiter_ricerca_e_selezione": "recOpA" }),
            ),
            record("recP4", json!({ "recruiter_ricerca_e_selezione": "recOpA" })),
        ];

        let dir = build_directory(&operators(), &processes);
        assert!(dir.recruiters.is_empty());
        assert!(dir.processes.is_empty());
    }

    #[test]
    fn skips_missing_or_unknown_recruiters() {
        let processes = vec![
            record("recP1", json!({ "stato_res": "fare ricerca" })),
            record(
                "recP2",
                json!({ "stato_res": "fare ricerca", "recruiter_ricerca_e_selezione": "recGhost" }),
            ),
            record(
                "recP3",
                json!({ "stato_res": "fare ricerca", "recruiter_ricerca_e_selezione": "recOpX" }),
            ),
        ];

        let dir = build_directory(&operators(), &processes);
        assert!(dir.recruiters.is_empty());
        assert!(dir.processes.is_empty());
    }

    #[test]
    fn find_helpers_match_ids_names_and_display_ids() {
        let processes = vec![record(
            "recP1",
            json!({ "stato_res": "fare ricerca", "recruiter_ricerca_e_selezione": "recOpA", "record_id_processo": "P1" }),
        )];
        let dir = build_directory(&operators(), &processes);

        assert_eq!(dir.find_recruiter("recOpA").map(|r| r.name.as_str()), Some("anna"));
        assert_eq!(dir.find_recruiter("ANNA").map(|r| r.id.as_str()), Some("recOpA"));
        assert!(dir.find_recruiter("Bianca").is_none());
        assert_eq!(dir.find_process("P1").map(|p| p.id.as_str()), Some("recP1"));
        assert_eq!(dir.find_process("recP1").map(|p| p.display_id.as_str()), Some("P1"));
        assert!(dir.find_process("P9").is_none());
    }
}
