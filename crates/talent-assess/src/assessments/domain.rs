use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::domain::{AssessmentData, AssessmentKind, AssessmentResults};
use crate::scoring::normalizer::{self, QuestionSpec, RawAnswer};

/// Identifier wrapper for scored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Candidate details carried through to the report renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateInfo {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub target_role: Option<String>,
}

/// A completed sitting as posted by the assessment UI.
///
/// Stage data can arrive pre-shaped in `data`, as catalog questions plus raw
/// answers, or both; raw answers are normalised and appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    pub candidate: CandidateInfo,
    #[serde(default)]
    pub kind: AssessmentKind,
    #[serde(default)]
    pub data: AssessmentData,
    #[serde(default)]
    pub questions: Vec<QuestionSpec>,
    #[serde(default)]
    pub answers: Vec<RawAnswer>,
    #[serde(default)]
    pub elapsed_ms: Option<u64>,
}

impl AssessmentSubmission {
    /// Scoring input with normalised raw answers merged in.
    pub fn scoring_input(&self) -> AssessmentData {
        let mut data = self.data.clone();
        if !self.answers.is_empty() {
            let assembled = normalizer::assemble(&self.questions, &self.answers);
            data.career_swipes.extend(assembled.career_swipes);
            data.skills_challenges.extend(assembled.skills_challenges);
            data.work_scenarios.extend(assembled.work_scenarios);
            data.rapid_fire.extend(assembled.rapid_fire);
        }
        data
    }

    /// Wall-clock time when supplied, then the answer timestamp span, then
    /// the summed answer times.
    pub fn elapsed(&self) -> u64 {
        self.elapsed_ms
            .or_else(|| normalizer::timestamp_span_ms(&self.answers))
            .unwrap_or_else(|| normalizer::total_response_time_ms(&self.answers))
    }
}

/// Stored outcome of a scored sitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub candidate: CandidateInfo,
    pub data: AssessmentData,
    pub results: AssessmentResults,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn status_view(&self) -> AssessmentStatusView {
        AssessmentStatusView {
            assessment_id: self.id.clone(),
            candidate_name: self.candidate.name.clone(),
            assessment: self.results.kind.label(),
            overall_score: self.results.overall_score.round(),
            readiness_level: self.results.career_readiness.level.clone(),
            percentile: self.results.career_readiness.percentile,
            validity_status: self.results.validity_metrics.validity_status,
            completed_at: self.completed_at,
        }
    }
}

/// Summary exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStatusView {
    pub assessment_id: AssessmentId,
    pub candidate_name: String,
    pub assessment: &'static str,
    pub overall_score: f64,
    pub readiness_level: String,
    pub percentile: f64,
    pub validity_status: crate::scoring::domain::ValidityStatus,
    pub completed_at: DateTime<Utc>,
}
