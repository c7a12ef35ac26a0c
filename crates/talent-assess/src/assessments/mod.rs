//! Orchestration around the scoring core: intake, storage, report dispatch
//! and the HTTP surface.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentId, AssessmentRecord, AssessmentStatusView, AssessmentSubmission, CandidateInfo,
};
pub use repository::{
    PublishError, ReportPublisher, ReportRequest, RepositoryError, ResultRepository,
};
pub use router::assessment_router;
pub use service::{AssessmentService, ServiceError};
