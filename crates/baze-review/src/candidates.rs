//! Ranked candidate list for one recruiter and process.
//!
//! Profiles are listed with a server-side formula, re-checked locally for
//! exact linkage, merged with their worker's experience duties, and sorted by
//! selection-status priority then travel time.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use baze_airtable::{AirtableClient, AirtableError, Formula, ListParams, SortDirection};
use baze_core::{selection_priority, SelectionStatus};
use regex::Regex;
use serde::Serialize;

use crate::directory::{fetch_directory, ProcessSummary, RecruiterSummary};
use crate::experience::{group_duties, ExperienceEntry};
use crate::profile::ProfileRecord;
use crate::settings::ReviewSettings;

static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*min").expect("valid minutes regex"));

/// Linkage criteria for one review session. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateQuery {
    pub recruiter_name: Option<String>,
    pub recruiter_id: Option<String>,
    pub process_display_id: Option<String>,
    pub process_record_id: Option<String>,
}

/// Response shape of the fetch-candidates endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidatesPayload {
    pub lavoratori: Vec<ProfileRecord>,
    pub recruiters: Vec<RecruiterSummary>,
    #[serde(rename = "processoInfo")]
    pub process_info: BTreeMap<String, ProcessSummary>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Server-side profile filter: recruiter linkage AND process linkage AND a
/// reviewable selection status.
#[must_use]
pub fn profile_formula(query: &CandidateQuery) -> Formula {
    let mut parts = Vec::new();

    let mut recruiter = Vec::new();
    if let Some(name) = non_empty(query.recruiter_name.as_ref()) {
        recruiter.push(Formula::eq("recruiter_processo_res", name));
        recruiter.push(Formula::find_in(name, "recruiter_processo_res"));
    }
    if let Some(id) = non_empty(query.recruiter_id.as_ref()) {
        recruiter.push(Formula::find_in(id, "recruiter_processo_res"));
    }
    if !recruiter.is_empty() {
        parts.push(Formula::any(recruiter));
    }

    let mut process = Vec::new();
    if let Some(display_id) = non_empty(query.process_display_id.as_ref()) {
        process.push(Formula::find_in(display_id, "processo_res"));
        process.push(Formula::eq("record_id_processo", display_id));
    }
    if let Some(record_id) = non_empty(query.process_record_id.as_ref()) {
        process.push(Formula::find_in(record_id, "processo_res"));
    }
    if !process.is_empty() {
        parts.push(Formula::any(process));
    }

    parts.push(Formula::any(
        SelectionStatus::REVIEWABLE
            .iter()
            .map(|status| Formula::eq("stato_selezione", status.label())),
    ));

    Formula::all(parts)
}

/// Experience filter over the given worker ids. `None` when there is nothing
/// to look up, so no request is made.
#[must_use]
pub fn experience_formula(worker_ids: &[String]) -> Option<Formula> {
    if worker_ids.is_empty() {
        return None;
    }
    Some(Formula::any(
        worker_ids
            .iter()
            .map(|id| Formula::find_in_joined(id.as_str(), "id_lavoratore")),
    ))
}

/// Exact linkage re-check. `FIND` matches substrings, so `P1` would also
/// select profiles of `P12` without this.
#[must_use]
pub fn matches_linkage(profile: &ProfileRecord, query: &CandidateQuery) -> bool {
    let display_id = non_empty(query.process_display_id.as_ref());
    let record_id = non_empty(query.process_record_id.as_ref());
    let process_ok = if display_id.is_none() && record_id.is_none() {
        true
    } else {
        profile
            .process_res
            .iter()
            .any(|p| Some(p.as_str()) == display_id || Some(p.as_str()) == record_id)
            || (display_id.is_some() && profile.process_display_id.as_deref() == display_id)
    };

    let name = non_empty(query.recruiter_name.as_ref());
    let id = non_empty(query.recruiter_id.as_ref());
    let recruiter_ok = if name.is_none() && id.is_none() {
        true
    } else {
        profile
            .recruiter_links
            .iter()
            .any(|link| Some(link.as_str()) == name || Some(link.as_str()) == id)
    };

    process_ok && recruiter_ok
}

/// Attaches each profile's flattened duties. Profiles without a worker id,
/// or whose worker has no experience rows, get an empty list.
pub fn merge_duties(profiles: &mut [ProfileRecord], entries: &[ExperienceEntry]) {
    let grouped = group_duties(entries);
    for profile in profiles.iter_mut() {
        profile.duties = profile
            .worker_id
            .as_ref()
            .and_then(|id| grouped.get(id))
            .cloned()
            .unwrap_or_default();
    }
}

/// Minutes from a travel-time label such as `"12 min"`.
///
/// Falls back to the digits of the label, and to `+∞` when there are none so
/// unknown travel times sort last.
#[must_use]
pub fn parse_travel_minutes(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return f64::INFINITY;
    };
    if let Some(caps) = MINUTES.captures(raw) {
        if let Ok(minutes) = caps[1].parse::<f64>() {
            return minutes;
        }
    }
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().unwrap_or(f64::INFINITY)
}

fn compare_candidates(a: &ProfileRecord, b: &ProfileRecord) -> Ordering {
    selection_priority(a.selection_status.as_deref())
        .cmp(&selection_priority(b.selection_status.as_deref()))
        .then_with(|| {
            parse_travel_minutes(a.travel_time.as_deref())
                .total_cmp(&parse_travel_minutes(b.travel_time.as_deref()))
        })
}

/// Stable sort by status priority, then travel minutes ascending.
pub fn sort_candidates(profiles: &mut [ProfileRecord]) {
    profiles.sort_by(compare_candidates);
}

fn unique_worker_ids(profiles: &[ProfileRecord]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in profiles.iter().filter_map(|p| p.worker_id.as_ref()) {
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    ids
}

/// Lists, filters, merges and ranks the profiles matching `query`.
///
/// # Errors
///
/// Returns [`AirtableError`] if the profile or experience listing fails.
pub async fn fetch_candidates(
    client: &AirtableClient,
    settings: &ReviewSettings,
    query: &CandidateQuery,
) -> Result<Vec<ProfileRecord>, AirtableError> {
    let params = ListParams::new()
        .view(settings.profiles_view.clone())
        .filter(profile_formula(query))
        .sort("travel_time_tra_cap", SortDirection::Asc)
        .page_size(settings.page_size)
        .max_records(settings.page_size as usize);
    let records = client
        .list_records(&settings.profiles_table, &params)
        .await?;
    let fetched = records.len();

    let mut profiles: Vec<ProfileRecord> = records
        .iter()
        .map(ProfileRecord::from_record)
        .filter(|profile| matches_linkage(profile, query))
        .collect();

    let worker_ids = unique_worker_ids(&profiles);
    let entries: Vec<ExperienceEntry> = match experience_formula(&worker_ids) {
        Some(formula) => client
            .list_records(
                &settings.experiences_table,
                &ListParams::new().filter(formula),
            )
            .await?
            .iter()
            .filter_map(ExperienceEntry::from_record)
            .collect(),
        None => Vec::new(),
    };

    merge_duties(&mut profiles, &entries);
    sort_candidates(&mut profiles);

    tracing::info!(
        fetched,
        kept = profiles.len(),
        experiences = entries.len(),
        "aggregated candidates"
    );
    Ok(profiles)
}

/// Resolves `recruiter` and `process` against a fresh directory, then fetches
/// the ranked candidates.
///
/// Unknown recruiters or processes yield an empty candidate list rather than
/// an error.
///
/// # Errors
///
/// Returns [`AirtableError`] if any listing fails.
pub async fn review_candidates(
    client: &AirtableClient,
    settings: &ReviewSettings,
    recruiter: Option<&str>,
    process: Option<&str>,
) -> Result<CandidatesPayload, AirtableError> {
    let directory = fetch_directory(client, settings).await?;

    let recruiter = recruiter.map(str::trim).filter(|s| !s.is_empty());
    let process = process
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"));

    let resolved_recruiter = match recruiter {
        Some(key) => match directory.find_recruiter(key) {
            Some(found) => Some(found),
            None => {
                tracing::info!(recruiter = key, "recruiter not found in directory");
                return Ok(empty_payload(directory.recruiters, directory.processes));
            }
        },
        None => None,
    };

    let resolved_process = match process {
        Some(key) => match directory.find_process(key) {
            Some(found) => Some(found),
            None => {
                tracing::info!(process = key, "process not found in directory");
                return Ok(empty_payload(directory.recruiters, directory.processes));
            }
        },
        None => None,
    };

    if let (Some(r), Some(p)) = (resolved_recruiter, resolved_process) {
        if p.recruiter_id != r.id {
            tracing::info!(recruiter = %r.id, process = %p.id, "process belongs to another recruiter");
            return Ok(empty_payload(directory.recruiters, directory.processes));
        }
    }

    let query = CandidateQuery {
        recruiter_name: resolved_recruiter
            .map(|r| r.name.clone())
            .or_else(|| resolved_process.map(|p| p.recruiter_name.clone())),
        recruiter_id: resolved_recruiter
            .map(|r| r.id.clone())
            .or_else(|| resolved_process.map(|p| p.recruiter_id.clone())),
        process_display_id: resolved_process.map(|p| p.display_id.clone()),
        process_record_id: resolved_process.map(|p| p.id.clone()),
    };

    let lavoratori = fetch_candidates(client, settings, &query).await?;
    Ok(CandidatesPayload {
        lavoratori,
        recruiters: directory.recruiters,
        process_info: directory.processes,
    })
}

fn empty_payload(
    recruiters: Vec<RecruiterSummary>,
    process_info: BTreeMap<String, ProcessSummary>,
) -> CandidatesPayload {
    CandidatesPayload {
        lavoratori: Vec::new(),
        recruiters,
        process_info,
    }
}

#[cfg(test)]
#[path = "candidates_test.rs"]
mod tests;
