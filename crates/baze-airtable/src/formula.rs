//! Builder for Airtable `filterByFormula` expressions.
//!
//! Only the subset the review workflow needs is modelled: equality,
//! `FIND(..., ARRAYJOIN(...))` membership, `AND` and `OR`. Every string
//! literal is rendered through [`escape_literal`].

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// `{field}='value'`
    Eq { field: String, value: String },
    /// `FIND('needle', ARRAYJOIN({field}, 'sep'))>0`, or without a separator
    /// argument when `separator` is `None`.
    Find {
        needle: String,
        field: String,
        separator: Option<String>,
    },
    And(Vec<Formula>),
    Or(Vec<Formula>),
}

impl Formula {
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Formula::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Membership test against a multi-valued field joined with `,`.
    #[must_use]
    pub fn find_in(needle: impl Into<String>, field: impl Into<String>) -> Self {
        Formula::Find {
            needle: needle.into(),
            field: field.into(),
            separator: Some(",".to_string()),
        }
    }

    /// Membership test using the store's default `ARRAYJOIN` separator.
    #[must_use]
    pub fn find_in_joined(needle: impl Into<String>, field: impl Into<String>) -> Self {
        Formula::Find {
            needle: needle.into(),
            field: field.into(),
            separator: None,
        }
    }

    #[must_use]
    pub fn all(parts: impl IntoIterator<Item = Formula>) -> Self {
        Formula::And(parts.into_iter().collect())
    }

    #[must_use]
    pub fn any(parts: impl IntoIterator<Item = Formula>) -> Self {
        Formula::Or(parts.into_iter().collect())
    }
}

/// Escapes a string literal for interpolation between single quotes.
#[must_use]
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "\\'")
}

fn write_group(f: &mut fmt::Formatter<'_>, name: &str, parts: &[Formula], empty: &str) -> fmt::Result {
    match parts {
        [] => f.write_str(empty),
        [single] => write!(f, "{single}"),
        many => {
            write!(f, "{name}(")?;
            for (idx, part) in many.iter().enumerate() {
                if idx > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{part}")?;
            }
            f.write_str(")")
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Eq { field, value } => write!(f, "{{{field}}}='{}'", escape_literal(value)),
            Formula::Find {
                needle,
                field,
                separator: Some(sep),
            } => write!(
                f,
                "FIND('{}', ARRAYJOIN({{{field}}}, '{}'))>0",
                escape_literal(needle),
                escape_literal(sep)
            ),
            Formula::Find {
                needle,
                field,
                separator: None,
            } => write!(
                f,
                "FIND('{}', ARRAYJOIN({{{field}}}))>0",
                escape_literal(needle)
            ),
            Formula::And(parts) => write_group(f, "AND", parts, "TRUE()"),
            Formula::Or(parts) => write_group(f, "OR", parts, "FALSE()"),
        }
    }
}
