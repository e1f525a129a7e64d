pub mod client;
pub mod error;
pub mod fields;
pub mod formula;
pub mod text;
pub mod types;

pub use client::AirtableClient;
pub use error::AirtableError;
pub use formula::{escape_literal, Formula};
pub use text::{decode_feedback, sanitize_display_text, sanitize_str, Feedback, NOT_AVAILABLE};
pub use types::{AirtableRecord, ListParams, Sort, SortDirection};
