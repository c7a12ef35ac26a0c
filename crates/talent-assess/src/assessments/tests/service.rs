use super::common::*;
use crate::assessments::domain::AssessmentId;
use crate::assessments::repository::{PublishError, RepositoryError, ResultRepository};
use crate::assessments::{AssessmentService, ServiceError};
use crate::matching::{CareerCatalog, MATCH_LIMIT};
use crate::scoring::{Dimension, ValidityStatus};
use std::sync::Arc;

#[test]
fn submit_scores_stores_and_requests_both_reports() {
    let (service, repository, reports) = build_service();

    let record = service.submit(submission()).expect("submission scored");

    assert!(record.id.0.starts_with("asmt-"));
    assert_eq!(
        record.results.validity_metrics.validity_status,
        ValidityStatus::Valid
    );
    assert_eq!(record.results.dimension_score(Dimension::CareerClarity), Some(100.0));

    let stored = repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, record);

    assert_eq!(
        reports.templates(),
        vec!["candidate_report".to_string(), "employer_report".to_string()]
    );
    let candidate_request = &reports.requests()[0];
    assert_eq!(candidate_request.assessment_id, record.id);
    assert_eq!(
        candidate_request.details.get("candidate").map(String::as_str),
        Some("Jordan Ellis")
    );
}

#[test]
fn invalid_completions_go_to_validity_review_instead_of_employer() {
    let (service, _, reports) = build_service();

    let record = service
        .submit(invalid_submission())
        .expect("invalid sittings are still stored");

    assert_eq!(
        record.results.validity_metrics.validity_status,
        ValidityStatus::Invalid
    );
    assert_eq!(
        reports.templates(),
        vec!["candidate_report".to_string(), "validity_review".to_string()]
    );
}

#[test]
fn submit_propagates_repository_errors() {
    let service = AssessmentService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryReports::default()),
        CareerCatalog::standard(),
    );

    match service.submit(submission()) {
        Err(ServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected unavailable repository, got {other:?}"),
    }
}

#[test]
fn submit_propagates_publish_errors() {
    let service = AssessmentService::new(
        Arc::new(MemoryRepository::default()),
        Arc::new(OfflineReports),
        CareerCatalog::standard(),
    );

    match service.submit(submission()) {
        Err(ServiceError::Publish(PublishError::Transport(_))) => {}
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.get(&AssessmentId("missing".to_string())) {
        Err(ServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn career_matches_are_ranked_and_capped() {
    let (service, _, _) = build_service();
    let record = service.submit(submission()).expect("submission scored");

    let matches = service.career_matches(&record.id).expect("matches computed");

    assert_eq!(matches.len(), MATCH_LIMIT);
    assert!(matches
        .windows(2)
        .all(|pair| pair[0].match_percentage >= pair[1].match_percentage));
}

#[test]
fn team_compatibility_includes_the_assessed_candidate() {
    let (service, _, _) = build_service();
    let record = service.submit(submission()).expect("submission scored");

    let roster = vec![
        teammate("tm-1", &[(Dimension::Adaptability, 80.0)]),
        teammate("tm-2", &[(Dimension::Adaptability, 20.0)]),
    ];
    let report = service
        .team_compatibility(&record.id, roster)
        .expect("report computed");

    assert_eq!(report.pairs.len(), 3);
    assert_eq!(report.pairs[0].member_a, record.id.0);
    assert!(report.average_compatibility.is_some());
}

#[test]
fn team_compatibility_rejects_empty_rosters() {
    let (service, _, _) = build_service();
    let record = service.submit(submission()).expect("submission scored");

    match service.team_compatibility(&record.id, Vec::new()) {
        Err(ServiceError::EmptyRoster) => {}
        other => panic!("expected empty roster error, got {other:?}"),
    }
}

#[test]
fn repository_lists_candidate_history() {
    let (service, repository, _) = build_service();
    service.submit(submission()).expect("first sitting");
    service.submit(submission()).expect("second sitting");

    let history = repository
        .for_candidate("Jordan Ellis")
        .expect("history available");

    assert_eq!(history.len(), 2);
}
