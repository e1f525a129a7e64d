//! Source sections shown next to the AI feedback and offered as flags in the
//! decision dialog.

use baze_airtable::NOT_AVAILABLE;
use serde::{Deserialize, Serialize};

use crate::profile::ProfileRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceField {
    #[serde(alias = "chi_sono")]
    About,
    #[serde(alias = "riassunto_profilo")]
    ProfileSummary,
    #[serde(alias = "descrizione_personale")]
    PersonalDescription,
    #[serde(alias = "esperienze")]
    ExperienceSummary,
    #[serde(alias = "mansioni")]
    RequiredDuties,
    #[serde(alias = "ricerca_famiglia")]
    FamilySearchDescription,
    #[serde(alias = "intervista")]
    InterviewTranscript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    Profile,
    Experience,
    Announcement,
    Interview,
}

impl SourceField {
    /// Every section, in display order.
    pub const ALL: [SourceField; 7] = [
        SourceField::About,
        SourceField::ProfileSummary,
        SourceField::PersonalDescription,
        SourceField::ExperienceSummary,
        SourceField::RequiredDuties,
        SourceField::FamilySearchDescription,
        SourceField::InterviewTranscript,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            SourceField::About => "Chi Sono",
            SourceField::ProfileSummary => "Riassunto Profilo Breve",
            SourceField::PersonalDescription => "Descrizione Personale",
            SourceField::ExperienceSummary => "Riassunto Esperienze Completo",
            SourceField::RequiredDuties => "Mansioni Richieste",
            SourceField::FamilySearchDescription => "Descrizione Ricerca Famiglia",
            SourceField::InterviewTranscript => "Transcript Intervista",
        }
    }

    #[must_use]
    pub fn category(self) -> SourceCategory {
        match self {
            SourceField::About
            | SourceField::ProfileSummary
            | SourceField::PersonalDescription => SourceCategory::Profile,
            SourceField::ExperienceSummary => SourceCategory::Experience,
            SourceField::RequiredDuties | SourceField::FamilySearchDescription => {
                SourceCategory::Announcement
            }
            SourceField::InterviewTranscript => SourceCategory::Interview,
        }
    }

    fn content(self, profile: &ProfileRecord) -> Option<&str> {
        let value = match self {
            SourceField::About => &profile.about,
            SourceField::ProfileSummary => &profile.profile_summary,
            SourceField::PersonalDescription => &profile.personal_description,
            SourceField::ExperienceSummary => &profile.experience_summary,
            SourceField::RequiredDuties => &profile.required_duties,
            SourceField::FamilySearchDescription => &profile.family_search_description,
            SourceField::InterviewTranscript => &profile.interview_transcript,
        };
        value.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSection {
    pub field: SourceField,
    pub title: &'static str,
    pub category: SourceCategory,
    pub content: String,
}

/// All source sections of a profile with display-ready content.
#[must_use]
pub fn source_sections(profile: &ProfileRecord) -> Vec<SourceSection> {
    SourceField::ALL
        .into_iter()
        .map(|field| SourceSection {
            field,
            title: field.title(),
            category: field.category(),
            content: field
                .content(profile)
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
        })
        .collect()
}
