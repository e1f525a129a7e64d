//! HTTP client for the Airtable REST API.
//!
//! Wraps `reqwest` with bearer authentication, `offset`-cursor pagination and
//! typed record deserialization. Non-2xx responses surface as
//! [`AirtableError::ExternalApi`] and are never retried.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::error::AirtableError;
use crate::types::{AirtableRecord, ListParams, ListResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.airtable.com";

/// Upper bound on pages followed by a single [`AirtableClient::list_records`].
pub const MAX_PAGES: usize = 100;

/// Client for one Airtable base.
///
/// Use [`AirtableClient::new`] for production or
/// [`AirtableClient::with_base_url`] to point at a mock server in tests.
pub struct AirtableClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl AirtableClient {
    /// Creates a client for `base_id` on the production Airtable API.
    ///
    /// # Errors
    ///
    /// Returns [`AirtableError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        base_id: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AirtableError> {
        Self::with_base_url(api_key, base_id, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AirtableError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AirtableError::InvalidBaseUrl`] if
    /// `base_url` is not a valid hierarchical URL.
    pub fn with_base_url(
        api_key: &str,
        base_id: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, AirtableError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let mut url = Url::parse(&normalised).map_err(|e| AirtableError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|()| AirtableError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push("v0")
            .push(base_id);

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: url,
        })
    }

    /// Lists every record of `table` matching `params`, following the
    /// `offset` cursor until the store stops returning one or
    /// `params.max_records` is reached.
    ///
    /// # Errors
    ///
    /// - [`AirtableError::ExternalApi`] on any non-2xx response.
    /// - [`AirtableError::Http`] on network failure.
    /// - [`AirtableError::Deserialize`] if a page does not match the expected shape.
    /// - [`AirtableError::PaginationLimit`] after [`MAX_PAGES`] pages.
    pub async fn list_records(
        &self,
        table: &str,
        params: &ListParams,
    ) -> Result<Vec<AirtableRecord>, AirtableError> {
        let mut records: Vec<AirtableRecord> = Vec::new();
        let mut offset: Option<String> = None;

        for page in 1..=MAX_PAGES {
            let url = self.build_list_url(table, params, offset.as_deref());
            let response: ListResponse = self
                .send_json(self.client.get(url), &format!("list {table} page {page}"))
                .await?;

            tracing::debug!(
                table,
                page,
                count = response.records.len(),
                "fetched Airtable page"
            );
            records.extend(response.records);

            if let Some(max) = params.max_records {
                if records.len() >= max {
                    records.truncate(max);
                    return Ok(records);
                }
            }

            match response.offset {
                Some(next) if !next.is_empty() => offset = Some(next),
                _ => return Ok(records),
            }
        }

        Err(AirtableError::PaginationLimit {
            table: table.to_string(),
            max_pages: MAX_PAGES,
        })
    }

    /// Sets a single field on one record.
    ///
    /// # Errors
    ///
    /// - [`AirtableError::MissingRecordId`] if `record_id` is empty; no
    ///   request is sent.
    /// - [`AirtableError::ExternalApi`] on any non-2xx response.
    /// - [`AirtableError::Http`] on network failure.
    pub async fn patch_field(
        &self,
        table: &str,
        record_id: &str,
        field: &str,
        value: Value,
    ) -> Result<AirtableRecord, AirtableError> {
        if record_id.trim().is_empty() {
            return Err(AirtableError::MissingRecordId {
                table: table.to_string(),
            });
        }

        let url = self.table_url(table, Some(record_id));
        let body = json!({ "fields": { field: value } });
        let record: AirtableRecord = self
            .send_json(
                self.client.patch(url).json(&body),
                &format!("patch {table}/{record_id}"),
            )
            .await?;

        tracing::info!(table, record_id, field, "patched Airtable record");
        Ok(record)
    }

    /// Creates one record in `table`.
    ///
    /// # Errors
    ///
    /// - [`AirtableError::ExternalApi`] on any non-2xx response.
    /// - [`AirtableError::Http`] on network failure.
    pub async fn create_record(
        &self,
        table: &str,
        fields: Map<String, Value>,
    ) -> Result<AirtableRecord, AirtableError> {
        let url = self.table_url(table, None);
        let body = json!({ "fields": fields });
        let record: AirtableRecord = self
            .send_json(self.client.post(url).json(&body), &format!("create {table}"))
            .await?;

        tracing::info!(table, record_id = %record.id, "created Airtable record");
        Ok(record)
    }

    fn table_url(&self, table: &str, record_id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(table).extend(record_id);
        }
        url
    }

    /// Builds the list URL with properly percent-encoded query parameters.
    ///
    /// Indexed parameters (`fields[0]`, `sort[0][field]`) follow the store's
    /// bracket convention.
    fn build_list_url(&self, table: &str, params: &ListParams, offset: Option<&str>) -> Url {
        let mut url = self.table_url(table, None);
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(view) = &params.view {
                pairs.append_pair("view", view);
            }
            if let Some(filter) = &params.filter {
                pairs.append_pair("filterByFormula", &filter.to_string());
            }
            if let Some(page_size) = params.page_size {
                pairs.append_pair("pageSize", &page_size.to_string());
            }
            for (idx, field) in params.fields.iter().enumerate() {
                pairs.append_pair(&format!("fields[{idx}]"), field);
            }
            for (idx, sort) in params.sort.iter().enumerate() {
                pairs.append_pair(&format!("sort[{idx}][field]"), &sort.field);
                if let Some(direction) = sort.direction {
                    pairs.append_pair(&format!("sort[{idx}][direction]"), direction.as_str());
                }
            }
            if let Some(offset) = offset {
                pairs.append_pair("offset", offset);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        url
    }

    /// Sends an authenticated request and parses a 2xx body as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`AirtableError::ExternalApi`] carrying the response body on a
    /// non-2xx status, [`AirtableError::Http`] on network failure and
    /// [`AirtableError::Deserialize`] if the body does not parse.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, AirtableError> {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                context,
                body = %body,
                "Airtable request failed"
            );
            return Err(AirtableError::ExternalApi {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| AirtableError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
