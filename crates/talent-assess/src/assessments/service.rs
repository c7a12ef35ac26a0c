use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{AssessmentId, AssessmentRecord, AssessmentSubmission};
use super::repository::{
    PublishError, ReportPublisher, ReportRequest, RepositoryError, ResultRepository,
};
use crate::matching::{
    match_careers, team_compatibility, CareerCatalog, CareerMatch, CommunicationProfile,
    TeamCompatibilityReport, TeamMember,
};
use crate::scoring::{calculate_final_results, ValidityStatus};

/// Service composing scoring, matching, storage and report dispatch.
pub struct AssessmentService<R, P> {
    repository: Arc<R>,
    reports: Arc<P>,
    catalog: Arc<CareerCatalog>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asmt-{id:06}"))
}

impl<R, P> AssessmentService<R, P>
where
    R: ResultRepository + 'static,
    P: ReportPublisher + 'static,
{
    pub fn new(repository: Arc<R>, reports: Arc<P>, catalog: CareerCatalog) -> Self {
        Self {
            repository,
            reports,
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &CareerCatalog {
        &self.catalog
    }

    /// Score a completed sitting, store it and request its reports.
    pub fn submit(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentRecord, ServiceError> {
        let data = submission.scoring_input();
        let elapsed_ms = submission.elapsed();
        let results = calculate_final_results(submission.kind, &data, elapsed_ms);

        let record = AssessmentRecord {
            id: next_assessment_id(),
            candidate: submission.candidate,
            data,
            results,
            completed_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        let validity = stored.results.validity_metrics.validity_status;

        info!(
            assessment_id = %stored.id.0,
            overall_score = stored.results.overall_score,
            ?validity,
            "assessment scored"
        );

        self.reports.publish(report_request("candidate_report", &stored))?;
        if validity == ValidityStatus::Invalid {
            warn!(
                assessment_id = %stored.id.0,
                flags = ?stored.results.validity_metrics.flags,
                "employer report withheld for invalid completion"
            );
            self.reports.publish(report_request("validity_review", &stored))?;
        } else {
            self.reports.publish(report_request("employer_report", &stored))?;
        }

        Ok(stored)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, ServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Top career matches for a stored assessment.
    pub fn career_matches(&self, id: &AssessmentId) -> Result<Vec<CareerMatch>, ServiceError> {
        let record = self.get(id)?;
        Ok(match_careers(
            &self.catalog,
            &record.results,
            &record.data.career_swipes,
            &record.data.rapid_fire,
        ))
    }

    /// Pairwise compatibility between the assessed candidate and a roster.
    pub fn team_compatibility(
        &self,
        id: &AssessmentId,
        roster: Vec<TeamMember>,
    ) -> Result<TeamCompatibilityReport, ServiceError> {
        if roster.is_empty() {
            return Err(ServiceError::EmptyRoster);
        }

        let record = self.get(id)?;
        let mut members = Vec::with_capacity(roster.len() + 1);
        members.push(TeamMember {
            id: record.id.0.clone(),
            name: record.candidate.name.clone(),
            profile: CommunicationProfile::from(&record.results),
        });
        members.extend(roster);

        Ok(team_compatibility(&members))
    }
}

fn report_request(template: &str, record: &AssessmentRecord) -> ReportRequest {
    let mut details = BTreeMap::new();
    details.insert("candidate".to_string(), record.candidate.name.clone());
    details.insert(
        "overall_score".to_string(),
        format!("{:.0}", record.results.overall_score),
    );
    details.insert(
        "readiness".to_string(),
        record.results.career_readiness.level.clone(),
    );

    ReportRequest {
        template: template.to_string(),
        assessment_id: record.id.clone(),
        details,
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error("team roster must contain at least one member")]
    EmptyRoster,
}
