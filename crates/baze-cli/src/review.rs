//! Review command handlers. Every handler prints pretty JSON on stdout.

use std::path::Path;

use anyhow::Context as _;
use baze_airtable::AirtableClient;
use baze_core::{AppConfig, Verdict};
use baze_review::{
    fetch_directory, fetch_worker_selections, record_status, review_candidates,
    source_sections, sync_candidates, ReviewSettings, SyncCandidate,
};
use serde::Serialize;
use serde_json::json;

pub(crate) struct Context {
    client: AirtableClient,
    settings: ReviewSettings,
}

impl Context {
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = AirtableClient::with_base_url(
            &config.airtable_api_key,
            &config.airtable_base_id,
            config.airtable_request_timeout_secs,
            &config.airtable_user_agent,
            &config.airtable_base_url,
        )?;
        Ok(Self {
            client,
            settings: ReviewSettings::from_app_config(config),
        })
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn run_processes(ctx: &Context) -> anyhow::Result<()> {
    let directory = fetch_directory(&ctx.client, &ctx.settings).await?;
    print_json(&directory)
}

pub(crate) async fn run_candidates(
    ctx: &Context,
    recruiter: Option<&str>,
    process: Option<&str>,
    sources: bool,
) -> anyhow::Result<()> {
    let payload = review_candidates(&ctx.client, &ctx.settings, recruiter, process).await?;
    if !sources {
        return print_json(&payload);
    }

    let sections: Vec<_> = payload
        .lavoratori
        .iter()
        .map(|profile| {
            json!({
                "id": profile.id,
                "name": profile.name,
                "feedback": profile.feedback.display_text(),
                "sections": source_sections(profile),
            })
        })
        .collect();
    print_json(&sections)
}

pub(crate) async fn run_decide(
    ctx: &Context,
    record_id: &str,
    verdict: Verdict,
) -> anyhow::Result<()> {
    let updated = record_status(&ctx.client, &ctx.settings, record_id, verdict)
        .await
        .with_context(|| format!("failed to record {verdict} for {record_id}"))?;
    tracing::info!(record_id, verdict = %verdict, "decision recorded");
    print_json(&json!({
        "record_id": updated.id,
        "verdict": verdict,
        "status": verdict.target_status().label(),
    }))
}

pub(crate) async fn run_selections(
    ctx: &Context,
    worker_id: &str,
    field: Option<&str>,
) -> anyhow::Result<()> {
    let selections = fetch_worker_selections(&ctx.client, &ctx.settings, worker_id, field).await?;
    print_json(&selections)
}

pub(crate) fn read_sync_file(path: &Path) -> anyhow::Result<Vec<SyncCandidate>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid candidates in {}", path.display()))
}

pub(crate) async fn run_sync(ctx: &Context, path: &Path) -> anyhow::Result<()> {
    let candidates = read_sync_file(path)?;
    let report = sync_candidates(&ctx.client, &ctx.settings, &candidates).await;
    print_json(&report)
}
