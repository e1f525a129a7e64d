//! Candidate profile built from a `lavoratori_selezionati` record.

use baze_airtable::fields::{
    attachment_url, first_or_scalar, is_present, number, resolve_aliased, scalar_text,
    string_list, text, unwrap_value_object,
};
use baze_airtable::{decode_feedback, sanitize_display_text, AirtableRecord, Feedback};
use serde::Serialize;
use serde_json::{Map, Value};

/// Field names under which the worker id has been stored across schema
/// revisions, in lookup priority order.
pub const WORKER_ID_ALIASES: [&str; 5] = [
    "lavoratore_id",
    "lavoratori_id",
    "id_lavoratore",
    "lavoratore",
    "id",
];

const NAME_FALLBACK: &str = "name not specified";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
    pub age: Option<f64>,
    pub photo_url: Option<String>,
    pub travel_time: Option<String>,
    pub travel_time_flag: Option<String>,
    pub years_experience_colf: Option<f64>,
    pub years_experience_babysitter: Option<f64>,
    pub years_experience_badante: Option<f64>,

    pub about: Option<String>,
    pub personal_description: Option<String>,
    pub experience_summary: Option<String>,
    pub profile_summary: Option<String>,
    pub interview_transcript: Option<String>,
    pub family_search_description: Option<String>,
    pub required_duties: Option<String>,
    pub required_duties_ai: Option<String>,
    pub availability_match: Option<String>,
    pub weekly_availability: Option<String>,
    pub recruiter_feedback: Option<String>,
    pub feedback: Feedback,

    pub process: Option<String>,
    pub process_res: Vec<String>,
    pub process_display_id: Option<String>,
    pub recruiter_links: Vec<String>,
    pub family_email: Option<String>,
    pub announcement_location: Option<String>,
    pub announcement_schedule: Option<String>,
    pub announcement_household: Option<String>,
    pub worker_address: Option<String>,
    pub family_address: Option<String>,

    pub selection_status: Option<String>,
    pub process_status: Option<String>,
    pub worker_id: Option<String>,
    pub worker_id_field: Option<String>,
    pub duties: Vec<String>,
}

/// Long-form text, cleaned for display. Absent or empty fields stay `None`.
fn free_text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .filter(|value| is_present(value))
        .map(sanitize_display_text)
}

/// Single-valued lookup text (first element only), cleaned for display.
fn lookup_text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(first_or_scalar)
        .filter(|value| is_present(value))
        .map(sanitize_display_text)
}

impl ProfileRecord {
    /// Normalizes a raw profile record. Never fails: unreadable fields are
    /// left empty.
    #[must_use]
    pub fn from_record(record: &AirtableRecord) -> Self {
        let fields = &record.fields;

        let name = text(fields, "nome_lavoratore")
            .or_else(|| text(fields, "lavoratore"))
            .unwrap_or_else(|| NAME_FALLBACK.to_string());

        let (worker_id, worker_id_field) = match resolve_aliased(fields, &WORKER_ID_ALIASES) {
            Some((alias, value)) => (scalar_text(value), Some(alias.to_string())),
            None => {
                tracing::debug!(record_id = %record.id, "profile has no worker id under any alias");
                (None, None)
            }
        };

        let availability_match = fields
            .get("match_disponibilità_famiglia_lavoratore")
            .filter(|value| is_present(value))
            .map(|value| sanitize_display_text(unwrap_value_object(value)));

        let feedback = fields
            .get("ai_agent_profiler")
            .map_or(Feedback::Empty, decode_feedback);

        Self {
            id: record.id.clone(),
            name,
            age: number(fields, "eta_lavoratore"),
            photo_url: attachment_url(fields, "foto_lavoratore"),
            travel_time: text(fields, "travel_time_tra_cap"),
            travel_time_flag: text(fields, "travel_time_flag"),
            years_experience_colf: number(fields, "anni_esperienza_colf"),
            years_experience_babysitter: number(fields, "anni_esperienza_babysitter"),
            years_experience_badante: number(fields, "anni_esperienza_badante"),

            about: lookup_text(fields, "chi_sono (from lavoratore)"),
            personal_description: free_text(fields, "chi_sono"),
            experience_summary: free_text(fields, "riassunto_esperienze_completo"),
            profile_summary: free_text(fields, "riassunto_profilo_breve"),
            interview_transcript: free_text(fields, "intervista_llm_transcript_history"),
            family_search_description: lookup_text(
                fields,
                "descrizione_ricerca_famiglia (from processo_res)",
            ),
            required_duties: lookup_text(fields, "mansioni_richieste (from processo_res)"),
            required_duties_ai: free_text(fields, "mansioni_richieste_transformed_ai"),
            availability_match,
            weekly_availability: free_text(fields, "disponibilità_settimanale_recap"),
            recruiter_feedback: free_text(fields, "feedback_recruiter"),
            feedback,

            process: text(fields, "processo"),
            process_res: string_list(fields, "processo_res"),
            process_display_id: text(fields, "record_id_processo"),
            recruiter_links: string_list(fields, "recruiter_processo_res"),
            family_email: text(fields, "email_processo_res_famiglia"),
            announcement_location: text(fields, "annuncio_luogo_riferimento_pubblico"),
            announcement_schedule: text(fields, "annuncio_orario_di_lavoro"),
            announcement_household: text(fields, "annuncio_nucleo_famigliare"),
            worker_address: text(fields, "indirizzo_lavoratore"),
            family_address: text(fields, "indirizzo_famiglia (from processo_res)"),

            selection_status: text(fields, "stato_selezione"),
            process_status: text(fields, "stato_processo_res"),
            worker_id,
            worker_id_field,
            duties: Vec::new(),
        }
    }
}
