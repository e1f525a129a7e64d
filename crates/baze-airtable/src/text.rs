//! Display-text cleanup for free-text fields.
//!
//! Long-form fields are frequently written by upstream automations as
//! stringified arrays (`["first", "second"]`) with escaped newlines and quotes.
//! [`sanitize_str`] peels those layers until the text is stable.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder shown for missing or empty text.
pub const NOT_AVAILABLE: &str = "not available";

static PSEUDO_ARRAY_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["'],\s*["']"#).expect("valid separator regex"));

/// Inner text when `open`..`close` wraps the whole of `s`.
fn strip_pair(s: &str, open: char, close: char) -> Option<&str> {
    s.strip_prefix(open)?.strip_suffix(close)
}

/// Removes at most one wrapping bracket layer and one wrapping quote layer.
/// `None` when nothing wraps the text.
fn strip_wrapping(s: &str) -> Option<&str> {
    let bracketed = strip_pair(s, '[', ']');
    let inner = bracketed.unwrap_or(s);
    let quoted = strip_pair(inner, '"', '"').or_else(|| strip_pair(inner, '\'', '\''));
    quoted.or(bracketed)
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') | None => {}
            Some(other) => out.push(other),
        }
    }
    out
}

/// One cleanup pass. Any change it makes strictly shortens the text.
///
/// Pseudo-array separators are only joined inside a stripped layer, so text
/// that nothing wraps keeps its own quotes and brackets.
fn sanitize_pass(input: &str) -> String {
    let s = input.trim();
    match strip_wrapping(s) {
        Some(inner) => unescape(&PSEUDO_ARRAY_SEPARATOR.replace_all(inner, "\n\n")),
        None => unescape(s),
    }
}

/// Cleans a raw text value for display. Idempotent.
#[must_use]
pub fn sanitize_str(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    if current.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        current
    }
}

/// Renders any field value as display text.
#[must_use]
pub fn sanitize_display_text(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(s) => sanitize_str(s),
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n\n");
            sanitize_str(&joined)
        }
        Value::Object(_) => value.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
    }
}

/// AI-generated profile feedback, decoded once at profile construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Feedback {
    Empty,
    Generated { text: String, stale: bool },
    Unparseable { raw: String },
}

impl Feedback {
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Feedback::Empty => String::new(),
            Feedback::Generated { text, .. } => text.clone(),
            Feedback::Unparseable { raw } => sanitize_str(raw),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Feedback::Empty)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EnvelopeState {
    Empty,
    Generated,
}

#[derive(Debug, Deserialize)]
struct FeedbackEnvelope {
    state: EnvelopeState,
    #[serde(default)]
    value: Option<Value>,
    #[serde(rename = "isStale", default)]
    is_stale: bool,
}

impl From<FeedbackEnvelope> for Feedback {
    fn from(envelope: FeedbackEnvelope) -> Self {
        match (envelope.state, envelope.value) {
            (EnvelopeState::Empty, _) | (EnvelopeState::Generated, None | Some(Value::Null)) => {
                Feedback::Empty
            }
            (EnvelopeState::Generated, Some(Value::String(text))) if text.trim().is_empty() => {
                Feedback::Empty
            }
            (EnvelopeState::Generated, Some(value)) => Feedback::Generated {
                text: sanitize_display_text(&value),
                stale: envelope.is_stale,
            },
        }
    }
}

/// Decodes the `{state, value, isStale}` envelope stored in the feedback
/// field, whether it arrives as a JSON string or an already-decoded object.
#[must_use]
pub fn decode_feedback(value: &Value) -> Feedback {
    match value {
        Value::Null => Feedback::Empty,
        Value::String(s) if s.trim().is_empty() => Feedback::Empty,
        Value::String(s) => match serde_json::from_str::<FeedbackEnvelope>(s) {
            Ok(envelope) => envelope.into(),
            Err(e) => {
                tracing::debug!(error = %e, "feedback field is not an envelope");
                Feedback::Unparseable { raw: s.clone() }
            }
        },
        Value::Array(_) => crate::fields::first_or_scalar(value)
            .map_or(Feedback::Empty, decode_feedback),
        Value::Object(_) => match serde_json::from_value::<FeedbackEnvelope>(value.clone()) {
            Ok(envelope) => envelope.into(),
            Err(e) => {
                tracing::debug!(error = %e, "feedback object is not an envelope");
                Feedback::Unparseable {
                    raw: value.to_string(),
                }
            }
        },
        Value::Number(_) | Value::Bool(_) => Feedback::Unparseable {
            raw: value.to_string(),
        },
    }
}
