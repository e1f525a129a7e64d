//! Selection-status vocabulary shared by every crate.
//!
//! The labels are the exact strings stored in the external tabular store and
//! are used verbatim as formula literals and patch values.

use serde::{Deserialize, Serialize};

/// Process lifecycle label meaning "actively collecting candidates".
pub const SOURCING_STAGE: &str = "fare ricerca";

/// Priority assigned to any status outside the reviewable allow-set.
pub const UNRANKED_PRIORITY: u8 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionStatus {
    GoodFit,
    Prospect,
    PoorFit,
    ToInterview,
    NotSelected,
}

impl SelectionStatus {
    /// Statuses a recruiter is asked to review, in priority order.
    pub const REVIEWABLE: [SelectionStatus; 3] = [
        SelectionStatus::GoodFit,
        SelectionStatus::Prospect,
        SelectionStatus::PoorFit,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SelectionStatus::GoodFit => "Candidato - Good fit",
            SelectionStatus::Prospect => "Prospetto",
            SelectionStatus::PoorFit => "Candidato - Poor fit",
            SelectionStatus::ToInterview => "Da colloquiare",
            SelectionStatus::NotSelected => "Non selezionato",
        }
    }

    /// Matches a raw store label exactly; anything else is `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        [
            SelectionStatus::GoodFit,
            SelectionStatus::Prospect,
            SelectionStatus::PoorFit,
            SelectionStatus::ToInterview,
            SelectionStatus::NotSelected,
        ]
        .into_iter()
        .find(|status| status.label() == label)
    }

    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            SelectionStatus::GoodFit => 0,
            SelectionStatus::Prospect => 1,
            SelectionStatus::PoorFit => 2,
            SelectionStatus::ToInterview | SelectionStatus::NotSelected => UNRANKED_PRIORITY,
        }
    }
}

impl std::fmt::Display for SelectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sort priority for a raw, possibly missing, status label.
#[must_use]
pub fn selection_priority(label: Option<&str>) -> u8 {
    label
        .and_then(SelectionStatus::from_label)
        .map_or(UNRANKED_PRIORITY, SelectionStatus::priority)
}

/// A recruiter's pass/no-pass judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    #[serde(alias = "no-pass")]
    NoPass,
}

impl Verdict {
    /// Status written back to the profile when this verdict is recorded.
    #[must_use]
    pub fn target_status(self) -> SelectionStatus {
        match self {
            Verdict::Pass => SelectionStatus::ToInterview,
            Verdict::NoPass => SelectionStatus::NotSelected,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::NoPass => write!(f, "no_pass"),
        }
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pass" => Ok(Verdict::Pass),
            "no_pass" | "no-pass" | "nopass" => Ok(Verdict::NoPass),
            other => Err(format!("unknown verdict '{other}'; expected pass or no_pass")),
        }
    }
}
