use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessments::domain::{AssessmentId, AssessmentRecord, AssessmentSubmission, CandidateInfo};
use crate::assessments::repository::{
    PublishError, ReportPublisher, ReportRequest, RepositoryError, ResultRepository,
};
use crate::assessments::{assessment_router, AssessmentService};
use crate::matching::{CareerCatalog, CommunicationProfile, TeamMember};
use crate::scoring::{
    AssessmentData, AssessmentKind, CareerSwipe, Department, Dimension, ForcedChoice,
    RapidFireResponse, ScenarioOption, SkillsChallenge, SwipeAction, WorkScenario,
};

pub(super) fn candidate() -> CandidateInfo {
    CandidateInfo {
        name: "Jordan Ellis".to_string(),
        email: Some("jordan@example.org".to_string()),
        target_role: Some("Software Engineer".to_string()),
    }
}

fn scenario(id: &str, points: &[(&str, f64)]) -> WorkScenario {
    WorkScenario {
        scenario_id: Some(id.to_string()),
        user_choice: Some("a".to_string()),
        options: vec![
            ScenarioOption {
                id: "a".to_string(),
                scores: points
                    .iter()
                    .map(|(key, value)| ((*key).to_string(), *value))
                    .collect(),
            },
            ScenarioOption {
                id: "b".to_string(),
                scores: BTreeMap::new(),
            },
        ],
    }
}

pub(super) fn assessment_data() -> AssessmentData {
    let mut allocation = BTreeMap::new();
    allocation.insert("Engineering".to_string(), 50_000.0);
    allocation.insert("Marketing".to_string(), 50_000.0);

    AssessmentData {
        career_swipes: vec![
            CareerSwipe {
                category: "technology".to_string(),
                action: SwipeAction::Like,
            },
            CareerSwipe {
                category: "technology".to_string(),
                action: SwipeAction::Like,
            },
            CareerSwipe {
                category: "sales".to_string(),
                action: SwipeAction::Dislike,
            },
        ],
        skills_challenges: vec![
            SkillsChallenge::ProblemSolving {
                allocation: Some(allocation),
                departments: vec![
                    Department {
                        name: "Engineering".to_string(),
                        optimal_range: (40_000.0, 60_000.0),
                    },
                    Department {
                        name: "Marketing".to_string(),
                        optimal_range: (40_000.0, 60_000.0),
                    },
                ],
                total_allocated: Some(100_000.0),
            },
            SkillsChallenge::Analytical {
                insights: Some(vec![
                    "Seasonal peaks every December".to_string(),
                    "Growth slows after the spring decline".to_string(),
                ]),
            },
        ],
        work_scenarios: vec![
            scenario("s1", &[("leadership", 4.0), ("teamwork", 3.0)]),
            scenario("s2", &[("communication", 3.0), ("work_ethic", 5.0)]),
        ],
        rapid_fire: vec![
            RapidFireResponse {
                dimension: "pace".to_string(),
                choice: ForcedChoice::A,
            },
            RapidFireResponse {
                dimension: "collaboration".to_string(),
                choice: ForcedChoice::B,
            },
            RapidFireResponse {
                dimension: "pace".to_string(),
                choice: ForcedChoice::A,
            },
        ],
    }
}

pub(super) fn submission() -> AssessmentSubmission {
    AssessmentSubmission {
        candidate: candidate(),
        kind: AssessmentKind::CareerReadiness,
        data: assessment_data(),
        questions: Vec::new(),
        answers: Vec::new(),
        elapsed_ms: Some(240_000),
    }
}

/// Every rapid-fire pick is `A` and the sitting took under a second per item.
pub(super) fn invalid_submission() -> AssessmentSubmission {
    let mut submission = submission();
    submission.data.rapid_fire = (0..6)
        .map(|index| RapidFireResponse {
            dimension: if index % 2 == 0 { "pace" } else { "focus" }.to_string(),
            choice: ForcedChoice::A,
        })
        .collect();
    submission.elapsed_ms = Some(1_000);
    submission
}

pub(super) fn teammate(id: &str, scores: &[(Dimension, f64)]) -> TeamMember {
    TeamMember {
        id: id.to_string(),
        name: id.to_uppercase(),
        profile: CommunicationProfile {
            dimensions: scores.iter().copied().collect(),
        },
    }
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryRepository, MemoryReports>,
    Arc<MemoryRepository>,
    Arc<MemoryReports>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let reports = Arc::new(MemoryReports::default());
    let service = AssessmentService::new(
        repository.clone(),
        reports.clone(),
        CareerCatalog::standard(),
    );
    (service, repository, reports)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl ResultRepository for MemoryRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_candidate(&self, name: &str) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.candidate.name == name)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryReports {
    requests: Arc<Mutex<Vec<ReportRequest>>>,
}

impl MemoryReports {
    pub(super) fn requests(&self) -> Vec<ReportRequest> {
        self.requests.lock().expect("report mutex poisoned").clone()
    }

    pub(super) fn templates(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.template)
            .collect()
    }
}

impl ReportPublisher for MemoryReports {
    fn publish(&self, request: ReportRequest) -> Result<(), PublishError> {
        self.requests
            .lock()
            .expect("report mutex poisoned")
            .push(request);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl ResultRepository for ConflictRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(None)
    }

    fn for_candidate(&self, _name: &str) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ResultRepository for UnavailableRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_candidate(&self, _name: &str) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct OfflineReports;

impl ReportPublisher for OfflineReports {
    fn publish(&self, _request: ReportRequest) -> Result<(), PublishError> {
        Err(PublishError::Transport("renderer offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: AssessmentService<MemoryRepository, MemoryReports>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}
