use thiserror::Error;

/// Errors returned by the Airtable client.
#[derive(Debug, Error)]
pub enum AirtableError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status. Never retried.
    #[error("Airtable API returned HTTP {status}: {body}")]
    ExternalApi { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("pagination limit reached for {table}: exceeded {max_pages} pages")]
    PaginationLimit { table: String, max_pages: usize },

    #[error("missing record id for update on {table}")]
    MissingRecordId { table: String },
}

impl AirtableError {
    /// HTTP status carried by an [`AirtableError::ExternalApi`] error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AirtableError::ExternalApi { status, .. } => Some(*status),
            AirtableError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
