//! Airtable request and response types.
//!
//! Records are kept as loosely-typed `fields` maps: the same logical field may
//! arrive as a scalar, a single-element array, or a nested object depending on
//! whether it is a plain column, a lookup, or a linked record. See
//! [`crate::fields`] for the readers that normalize those shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::formula::Formula;

/// A single record as returned by `GET /v0/{base}/{table}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirtableRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(
        rename = "createdTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<String>,
}

impl AirtableRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
            created_time: None,
        }
    }

    /// Raw value of a field, if the store returned it at all.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// One page of a list response: `{ "records": [...], "offset": "..." }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub records: Vec<AirtableRecord>,
    #[serde(default)]
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: Option<SortDirection>,
}

/// Options for [`crate::AirtableClient::list_records`].
///
/// `page_size` is forwarded as `pageSize`; `max_records` stops pagination
/// once that many records have been collected.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub view: Option<String>,
    pub filter: Option<Formula>,
    pub sort: Vec<Sort>,
    pub fields: Vec<String>,
    pub page_size: Option<u32>,
    pub max_records: Option<usize>,
}

impl ListParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, formula: Formula) -> Self {
        self.filter = Some(formula);
        self
    }

    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push(Sort {
            field: field.into(),
            direction: Some(direction),
        });
        self
    }

    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }
}
