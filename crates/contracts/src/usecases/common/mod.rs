//! Common types and traits for all UseCases

pub mod record_issue;
pub mod run_status;
pub mod usecase_metadata;

// Re-exports
pub use record_issue::{IssueKind, RecordIssue};
pub use run_status::RunStatus;
pub use usecase_metadata::UseCaseMetadata;
