use std::collections::BTreeMap;

use super::domain::{
    AssessmentKind, AssessmentResults, CareerReadiness, CategoryInterest, ChallengeScore,
    Dimension, DimensionScore, ReadinessTier, ValidityMetrics,
};
use super::scorers::NEUTRAL_SCORE;

pub const STRENGTH_THRESHOLD: f64 = 70.0;
const RANKED_SLOTS: usize = 3;

/// Builds the weighted dimension map for the fixed dimension set of `kind`.
/// Dimensions absent from `raw` read as neutral.
pub fn dimension_scores(
    kind: AssessmentKind,
    raw: &BTreeMap<Dimension, f64>,
) -> BTreeMap<Dimension, DimensionScore> {
    kind.weights()
        .iter()
        .map(|(dimension, weight)| {
            let score = raw
                .get(dimension)
                .copied()
                .unwrap_or(NEUTRAL_SCORE)
                .clamp(0.0, 100.0)
                .round();
            (
                *dimension,
                DimensionScore {
                    score,
                    weight: *weight,
                    level: kind.level_for(score),
                },
            )
        })
        .collect()
}

/// `Σ score × weight` over the supplied dimensions.
pub fn overall_score(dimensions: &BTreeMap<Dimension, DimensionScore>) -> f64 {
    dimensions
        .values()
        .map(|entry| entry.score * entry.weight)
        .sum::<f64>()
        .clamp(0.0, 100.0)
}

pub fn readiness_tier(overall: f64) -> ReadinessTier {
    if overall >= 85.0 {
        ReadinessTier::Highly
    } else if overall >= 70.0 {
        ReadinessTier::Ready
    } else if overall >= 50.0 {
        ReadinessTier::Developing
    } else {
        ReadinessTier::NotReady
    }
}

/// Percentile interpolated linearly inside each readiness band.
pub fn percentile(overall: f64) -> f64 {
    let overall = overall.clamp(0.0, 100.0);
    let value = if overall >= 85.0 {
        90.0 + (overall - 85.0) / 15.0 * 10.0
    } else if overall >= 70.0 {
        70.0 + (overall - 70.0) / 15.0 * 20.0
    } else if overall >= 50.0 {
        40.0 + (overall - 50.0) / 20.0 * 30.0
    } else {
        overall / 50.0 * 40.0
    };
    value.clamp(0.0, 100.0).round()
}

/// Dimensions ordered by score, highest first. Ties keep weight-table order.
fn ranked(
    kind: AssessmentKind,
    dimensions: &BTreeMap<Dimension, DimensionScore>,
) -> Vec<(Dimension, f64)> {
    let mut ranked: Vec<(Dimension, f64)> = kind
        .weights()
        .iter()
        .filter_map(|(dimension, _)| dimensions.get(dimension).map(|entry| (*dimension, entry.score)))
        .collect();
    ranked.sort_by(|left, right| right.1.total_cmp(&left.1));
    ranked
}

/// Top three dimensions scoring at least 70, as display names.
pub fn strengths(
    kind: AssessmentKind,
    dimensions: &BTreeMap<Dimension, DimensionScore>,
) -> Vec<String> {
    ranked(kind, dimensions)
        .into_iter()
        .take(RANKED_SLOTS)
        .filter(|(_, score)| *score >= STRENGTH_THRESHOLD)
        .map(|(dimension, _)| dimension.label())
        .collect()
}

/// Bottom three dimensions scoring below 70, lowest first.
pub fn development_areas(
    kind: AssessmentKind,
    dimensions: &BTreeMap<Dimension, DimensionScore>,
) -> Vec<String> {
    let mut ranked = ranked(kind, dimensions);
    ranked.reverse();
    ranked
        .into_iter()
        .take(RANKED_SLOTS)
        .filter(|(_, score)| *score < STRENGTH_THRESHOLD)
        .map(|(dimension, _)| dimension.label())
        .collect()
}

pub fn career_readiness(
    kind: AssessmentKind,
    overall: f64,
    dimensions: &BTreeMap<Dimension, DimensionScore>,
) -> CareerReadiness {
    let tier = readiness_tier(overall);
    CareerReadiness {
        level: tier.label(kind).to_string(),
        tier,
        percentile: percentile(overall),
        strengths: strengths(kind, dimensions),
        development_areas: development_areas(kind, dimensions),
    }
}

pub fn aggregate(
    kind: AssessmentKind,
    raw: &BTreeMap<Dimension, f64>,
    validity_metrics: ValidityMetrics,
    challenge_scores: Vec<ChallengeScore>,
    category_interest: Vec<CategoryInterest>,
) -> AssessmentResults {
    let dimensions = dimension_scores(kind, raw);
    let overall = overall_score(&dimensions);
    let career_readiness = career_readiness(kind, overall, &dimensions);

    AssessmentResults {
        kind,
        overall_score: overall,
        dimensions,
        validity_metrics,
        career_readiness,
        challenge_scores,
        category_interest,
    }
}
