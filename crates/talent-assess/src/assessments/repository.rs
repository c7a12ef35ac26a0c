use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, AssessmentRecord};

/// Storage abstraction; the hosted database lives behind this port.
pub trait ResultRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    fn for_candidate(&self, name: &str) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook to the candidate and employer report renderers.
pub trait ReportPublisher: Send + Sync {
    fn publish(&self, request: ReportRequest) -> Result<(), PublishError>;
}

/// Render request for one report template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub template: String,
    pub assessment_id: AssessmentId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("report renderer unavailable: {0}")]
    Transport(String),
}
