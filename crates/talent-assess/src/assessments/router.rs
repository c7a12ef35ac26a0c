use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{AssessmentId, AssessmentSubmission};
use super::repository::{ReportPublisher, RepositoryError, ResultRepository};
use super::service::{AssessmentService, ServiceError};
use crate::matching::TeamMember;

/// Router builder exposing scoring and matching endpoints.
pub fn assessment_router<R, P>(service: Arc<AssessmentService<R, P>>) -> Router
where
    R: ResultRepository + 'static,
    P: ReportPublisher + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(submit_handler::<R, P>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(results_handler::<R, P>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/careers",
            get(careers_handler::<R, P>),
        )
        .route(
            "/api/v1/teams/compatibility",
            post(compatibility_handler::<R, P>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompatibilityRequest {
    pub(crate) assessment_id: String,
    #[serde(default)]
    pub(crate) roster: Vec<TeamMember>,
}

pub(crate) async fn submit_handler<R, P>(
    State(service): State<Arc<AssessmentService<R, P>>>,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    R: ResultRepository + 'static,
    P: ReportPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.status_view())).into_response(),
        Err(ServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "assessment already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => processing_failed(other),
    }
}

pub(crate) async fn results_handler<R, P>(
    State(service): State<Arc<AssessmentService<R, P>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
    P: ReportPublisher + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(record) => {
            let payload = json!({
                "summary": record.status_view(),
                "results": record.results,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(ServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => processing_failed(other),
    }
}

pub(crate) async fn careers_handler<R, P>(
    State(service): State<Arc<AssessmentService<R, P>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
    P: ReportPublisher + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.career_matches(&id) {
        Ok(matches) => (StatusCode::OK, axum::Json(matches)).into_response(),
        Err(ServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => processing_failed(other),
    }
}

pub(crate) async fn compatibility_handler<R, P>(
    State(service): State<Arc<AssessmentService<R, P>>>,
    axum::Json(request): axum::Json<CompatibilityRequest>,
) -> Response
where
    R: ResultRepository + 'static,
    P: ReportPublisher + 'static,
{
    let id = AssessmentId(request.assessment_id);
    match service.team_compatibility(&id, request.roster) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(ServiceError::EmptyRoster) => {
            let payload = json!({ "error": ServiceError::EmptyRoster.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => processing_failed(other),
    }
}

fn not_found(id: &AssessmentId) -> Response {
    let payload = json!({
        "assessment_id": id.0,
        "error": "assessment not found",
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn processing_failed(err: ServiceError) -> Response {
    error!(error = %err, "assessment processing failed");
    let payload = json!({
        "error": "assessment processing failed",
        "detail": err.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
