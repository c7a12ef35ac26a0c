//! Assessment scoring: normalisation, per-archetype scorers, validity
//! analysis and weighted aggregation.

pub mod aggregate;
pub mod domain;
pub mod normalizer;
pub mod scorers;
pub mod validity;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentData, AssessmentKind, AssessmentResults, CareerReadiness, CareerSwipe,
    CategoryInterest, ChallengeScore, Department, Dimension, DimensionLevel, DimensionScore,
    EngagementLevel, ForcedChoice, RapidFireResponse, ReadinessTier, ScenarioOption,
    SkillsChallenge, SwipeAction, ValidityFlag, ValidityMetrics, ValidityStatus, WorkScenario,
};
pub use normalizer::{QuestionKind, QuestionSignal, QuestionSpec, RawAnswer};

use std::collections::BTreeMap;

use tracing::debug;

/// Scores one completed assessment.
///
/// `elapsed_ms` is the wall-clock time the candidate spent; it only feeds the
/// validity analysis. The call is pure and never fails: absent stages degrade
/// to default scores.
pub fn calculate_final_results(
    kind: AssessmentKind,
    data: &AssessmentData,
    elapsed_ms: u64,
) -> AssessmentResults {
    let raw = raw_dimension_scores(kind, data);
    let validity = validity::analyze(data.item_count(), elapsed_ms, &data.rapid_fire);
    let challenge_scores = scorers::challenge_scores(&data.skills_challenges);
    let category_interest = scorers::category_interest(&data.career_swipes);

    let results = aggregate::aggregate(kind, &raw, validity, challenge_scores, category_interest);

    debug!(
        kind = kind.label(),
        overall_score = results.overall_score,
        readiness = %results.career_readiness.level,
        "assessment scored"
    );

    results
}

/// Unweighted scores for the dimensions this kind of assessment measures.
pub fn raw_dimension_scores(kind: AssessmentKind, data: &AssessmentData) -> BTreeMap<Dimension, f64> {
    let mut raw = scorers::scenario_dimensions(&data.work_scenarios);
    raw.retain(|dimension, _| kind.weight_of(*dimension).is_some());

    if kind == AssessmentKind::CareerReadiness {
        raw.insert(
            Dimension::CareerClarity,
            scorers::career_clarity(&data.career_swipes),
        );
        raw.insert(
            Dimension::SkillReadiness,
            scorers::skill_readiness(&data.skills_challenges),
        );
    }

    raw
}
