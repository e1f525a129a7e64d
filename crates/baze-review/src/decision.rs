//! Pass/no-pass decisions and the in-memory review queue.
//!
//! A decision is persisted only as the profile's `stato_selezione` value.
//! Concurrent reviewers are not coordinated: the last patch wins.

use baze_airtable::{AirtableClient, AirtableError, AirtableRecord};
use baze_core::Verdict;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::profile::ProfileRecord;
use crate::settings::ReviewSettings;
use crate::source_fields::SourceField;

const SELECTION_STATUS_FIELD: &str = "stato_selezione";

/// Ordered profiles under review plus a cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewQueue<T> {
    items: Vec<T>,
    index: usize,
}

impl<T> ReviewQueue<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self { items, index: 0 }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// Moves to the next item; stays on the last one.
    pub fn advance(&mut self) -> bool {
        if self.index + 1 < self.items.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Moves to the previous item; stays on the first one.
    pub fn go_back(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Removes the current item. The cursor then points at the item that
    /// followed it, or at the new last item.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(self.index);
        self.index = self.index.min(self.items.len().saturating_sub(1));
        Some(removed)
    }
}

/// Source sections a recruiter highlighted while deciding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSelection(Vec<SourceField>);

impl FlagSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `field` if absent, removes it otherwise. Selection order is kept.
    pub fn toggle(&mut self, field: SourceField) {
        if let Some(pos) = self.0.iter().position(|f| *f == field) {
            self.0.remove(pos);
        } else {
            self.0.push(field);
        }
    }

    #[must_use]
    pub fn contains(&self, field: SourceField) -> bool {
        self.0.contains(&field)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SourceField] {
        &self.0
    }
}

impl FromIterator<SourceField> for FlagSelection {
    fn from_iter<I: IntoIterator<Item = SourceField>>(iter: I) -> Self {
        let mut selection = Self::new();
        for field in iter {
            if !selection.contains(field) {
                selection.0.push(field);
            }
        }
        selection
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    #[serde(default)]
    pub flags: FlagSelection,
}

impl Decision {
    #[must_use]
    pub fn new(verdict: Verdict) -> Self {
        Self {
            verdict,
            flags: FlagSelection::new(),
        }
    }
}

/// Writes the verdict's target status onto one profile record.
///
/// # Errors
///
/// Returns [`AirtableError`] if the record id is empty or the patch fails.
pub async fn record_status(
    client: &AirtableClient,
    settings: &ReviewSettings,
    record_id: &str,
    verdict: Verdict,
) -> Result<AirtableRecord, AirtableError> {
    client
        .patch_field(
            &settings.profiles_table,
            record_id,
            SELECTION_STATUS_FIELD,
            Value::String(verdict.target_status().label().to_string()),
        )
        .await
}

/// Records `decision` for the queue's current profile.
///
/// On success the profile is removed from the queue and returned. On failure
/// the queue is left exactly as it was. An empty queue yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`AirtableError`] if the status patch fails.
pub async fn record_decision(
    client: &AirtableClient,
    settings: &ReviewSettings,
    queue: &mut ReviewQueue<ProfileRecord>,
    decision: &Decision,
) -> Result<Option<ProfileRecord>, AirtableError> {
    let Some(current) = queue.current() else {
        return Ok(None);
    };

    let record_id = current.id.clone();
    if let Err(e) = record_status(client, settings, &record_id, decision.verdict).await {
        tracing::warn!(record_id = %record_id, verdict = %decision.verdict, error = %e, "decision not recorded");
        return Err(e);
    }

    tracing::info!(
        record_id = %record_id,
        verdict = %decision.verdict,
        flags = ?decision.flags.as_slice(),
        "decision recorded"
    );
    Ok(queue.remove_current())
}
