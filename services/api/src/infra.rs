use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talent_assess::assessments::{
    AssessmentId, AssessmentRecord, PublishError, ReportPublisher, ReportRequest,
    RepositoryError, ResultRepository,
};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local result store standing in for the hosted database.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultRepository {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl ResultRepository for InMemoryResultRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository lock poisoned".to_string()))?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn for_candidate(&self, name: &str) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository lock poisoned".to_string()))?;
        let mut records: Vec<AssessmentRecord> = guard
            .values()
            .filter(|record| record.candidate.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect();
        records.sort_by_key(|record| record.completed_at);
        Ok(records)
    }
}

/// Keeps report requests in memory until a renderer is attached.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReportPublisher {
    requests: Arc<Mutex<Vec<ReportRequest>>>,
}

impl ReportPublisher for InMemoryReportPublisher {
    fn publish(&self, request: ReportRequest) -> Result<(), PublishError> {
        debug!(
            template = %request.template,
            assessment_id = %request.assessment_id.0,
            "report queued"
        );
        let mut guard = self
            .requests
            .lock()
            .map_err(|_| PublishError::Transport("report queue lock poisoned".to_string()))?;
        guard.push(request);
        Ok(())
    }
}

impl InMemoryReportPublisher {
    pub(crate) fn requests(&self) -> Vec<ReportRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
