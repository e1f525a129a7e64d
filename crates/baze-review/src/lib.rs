//! Recruiter review workflow over the Airtable base.
//!
//! Builds the recruiter/process directory, aggregates the ranked candidate
//! list for one process, and records pass/no-pass decisions.

pub mod candidates;
pub mod decision;
pub mod directory;
pub mod experience;
pub mod profile;
pub mod selections;
pub mod settings;
pub mod source_fields;
pub mod sync;

pub use candidates::{
    fetch_candidates, review_candidates, CandidateQuery, CandidatesPayload,
};
pub use decision::{record_decision, record_status, Decision, FlagSelection, ReviewQueue};
pub use directory::{
    build_directory, fetch_directory, ProcessSummary, RecruiterDirectory, RecruiterSummary,
};
pub use experience::ExperienceEntry;
pub use profile::{ProfileRecord, WORKER_ID_ALIASES};
pub use selections::{fetch_worker_selections, WorkerSelection};
pub use settings::ReviewSettings;
pub use source_fields::{source_sections, SourceCategory, SourceField, SourceSection};
pub use sync::{sync_candidates, SyncCandidate, SyncOutcome, SyncReport};
