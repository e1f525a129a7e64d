use std::collections::HashMap;

use baze_airtable::fields::{first_or_scalar, is_present, scalar_text, string_list};
use baze_airtable::AirtableRecord;

/// One `esperienze_lavoratore` row: the duties a worker performed in a past job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub worker_id: String,
    pub duties: Vec<String>,
}

impl ExperienceEntry {
    /// Returns `None` when the row is not linked to any worker.
    #[must_use]
    pub fn from_record(record: &AirtableRecord) -> Option<Self> {
        let fields = &record.fields;
        let worker_id = fields
            .get("id_lavoratore")
            .and_then(first_or_scalar)
            .and_then(scalar_text)?;

        // Older rows carry the misspelled column.
        let duties_field = if fields.get("manzioni").is_some_and(is_present) {
            "manzioni"
        } else {
            "mansioni"
        };

        Some(Self {
            worker_id,
            duties: string_list(fields, duties_field),
        })
    }
}

/// Concatenates duties per worker. Rows for the same worker are appended in
/// the order given, duplicates included.
#[must_use]
pub fn group_duties(entries: &[ExperienceEntry]) -> HashMap<String, Vec<String>> {
    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    for entry in entries {
        grouped
            .entry(entry.worker_id.clone())
            .or_default()
            .extend(entry.duties.iter().cloned());
    }
    grouped
}
