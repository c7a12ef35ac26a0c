use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::scoring::domain::{AssessmentResults, Dimension};
use crate::scoring::scorers::NEUTRAL_SCORE;

const SYNERGY_BASE: f64 = 40.0;

/// Dimension scores of one person, as used for pairwise comparison.
///
/// Keys that do not name a known dimension are dropped on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunicationProfile {
    #[serde(default, deserialize_with = "known_dimensions")]
    pub dimensions: BTreeMap<Dimension, f64>,
}

fn known_dimensions<'de, D>(deserializer: D) -> Result<BTreeMap<Dimension, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, score)| Dimension::from_key(&key).map(|dimension| (dimension, score)))
        .collect())
}

impl CommunicationProfile {
    pub fn score(&self, dimension: Dimension) -> f64 {
        self.dimensions
            .get(&dimension)
            .copied()
            .unwrap_or(NEUTRAL_SCORE)
            .clamp(0.0, 100.0)
    }

    fn delta(&self, other: &Self, dimension: Dimension) -> f64 {
        (self.score(dimension) - other.score(dimension)).abs()
    }
}

impl From<&AssessmentResults> for CommunicationProfile {
    fn from(results: &AssessmentResults) -> Self {
        Self {
            dimensions: results
                .dimensions
                .iter()
                .map(|(dimension, entry)| (*dimension, entry.score))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityMatrix {
    pub working_style_match: f64,
    pub communication_synergy: f64,
    pub conflict_potential: f64,
    pub overall_compatibility: f64,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
    pub recommendations: Vec<String>,
}

struct SynergyRule {
    first: Dimension,
    first_min: f64,
    second: Dimension,
    second_min: f64,
    bonus: f64,
    /// Whether the pattern may be satisfied with the roles swapped.
    either_way: bool,
}

const SYNERGY_RULES: [SynergyRule; 4] = [
    SynergyRule {
        first: Dimension::Assertiveness,
        first_min: 70.0,
        second: Dimension::ActiveListening,
        second_min: 70.0,
        bonus: 20.0,
        either_way: true,
    },
    SynergyRule {
        first: Dimension::Expressiveness,
        first_min: 70.0,
        second: Dimension::InformationProcessing,
        second_min: 70.0,
        bonus: 15.0,
        either_way: true,
    },
    SynergyRule {
        first: Dimension::Adaptability,
        first_min: 70.0,
        second: Dimension::ConflictManagement,
        second_min: 70.0,
        bonus: 10.0,
        either_way: true,
    },
    SynergyRule {
        first: Dimension::EmotionalIntelligence,
        first_min: 60.0,
        second: Dimension::EmotionalIntelligence,
        second_min: 60.0,
        bonus: 15.0,
        either_way: false,
    },
];

impl SynergyRule {
    fn applies(&self, a: &CommunicationProfile, b: &CommunicationProfile) -> bool {
        let forward = a.score(self.first) > self.first_min && b.score(self.second) > self.second_min;
        let backward = self.either_way
            && b.score(self.first) > self.first_min
            && a.score(self.second) > self.second_min;
        forward || backward
    }
}

pub fn working_style_match(a: &CommunicationProfile, b: &CommunicationProfile) -> f64 {
    let deltas = [
        a.delta(b, Dimension::Assertiveness),
        a.delta(b, Dimension::Expressiveness),
        a.delta(b, Dimension::InformationProcessing),
    ];
    (100.0 - deltas.iter().sum::<f64>() / deltas.len() as f64).clamp(0.0, 100.0)
}

pub fn communication_synergy(a: &CommunicationProfile, b: &CommunicationProfile) -> f64 {
    let bonus: f64 = SYNERGY_RULES
        .iter()
        .filter(|rule| rule.applies(a, b))
        .map(|rule| rule.bonus)
        .sum();
    (SYNERGY_BASE + bonus).min(100.0)
}

pub fn conflict_potential(a: &CommunicationProfile, b: &CommunicationProfile) -> f64 {
    let conflict = a.delta(b, Dimension::ConflictManagement);
    let assertiveness = a.delta(b, Dimension::Assertiveness);
    ((conflict + assertiveness) / 2.0).clamp(0.0, 100.0)
}

pub fn compare_profiles(a: &CommunicationProfile, b: &CommunicationProfile) -> CompatibilityMatrix {
    let working_style_match = working_style_match(a, b);
    let communication_synergy = communication_synergy(a, b);
    let conflict_potential = conflict_potential(a, b);
    let overall_compatibility = (0.4 * working_style_match
        + 0.4 * communication_synergy
        + 0.2 * (100.0 - conflict_potential))
        .clamp(0.0, 100.0);

    let mut strengths = Vec::new();
    let mut challenges = Vec::new();
    let mut recommendations = Vec::new();

    if working_style_match >= 80.0 {
        strengths.push("Similar working styles make day-to-day coordination easy".to_string());
    }
    if communication_synergy >= 70.0 {
        strengths.push("Complementary communication strengths reinforce each other".to_string());
    }
    if conflict_potential <= 20.0 {
        strengths.push("Aligned approaches to disagreement keep friction low".to_string());
    }

    if a.delta(b, Dimension::Assertiveness) > 40.0 {
        challenges.push("Differing assertiveness levels may let one voice dominate".to_string());
        recommendations
            .push("Rotate who leads discussions and invite the quieter view first".to_string());
    }
    if a.delta(b, Dimension::InformationProcessing) > 30.0 {
        challenges
            .push("Different information processing speeds can stall decisions".to_string());
        recommendations.push(
            "Agree on decision timelines and share material ahead of meetings".to_string(),
        );
    }
    if a.delta(b, Dimension::Expressiveness) > 40.0 {
        challenges.push("Contrasting expressiveness may be read as over- or under-engagement".to_string());
        recommendations.push("Check in explicitly on how feedback was received".to_string());
    }
    if conflict_potential > 40.0 {
        challenges.push("Divergent conflict styles raise the risk of unresolved tension".to_string());
        recommendations.push("Establish a shared conflict resolution protocol early".to_string());
    }

    if recommendations.is_empty() {
        recommendations.push("Maintain regular check-ins to preserve the working rhythm".to_string());
    }

    CompatibilityMatrix {
        working_style_match,
        communication_synergy,
        conflict_potential,
        overall_compatibility,
        strengths,
        challenges,
        recommendations,
    }
}

/// Pairwise compatibility of two completed assessments.
pub fn calculate_compatibility(a: &AssessmentResults, b: &AssessmentResults) -> CompatibilityMatrix {
    compare_profiles(&CommunicationProfile::from(a), &CommunicationProfile::from(b))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub profile: CommunicationProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairCompatibility {
    pub member_a: String,
    pub member_b: String,
    pub matrix: CompatibilityMatrix,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCompatibilityReport {
    pub pairs: Vec<PairCompatibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_compatibility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_pair: Option<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_pair: Option<(String, String)>,
}

/// Compatibility for every unordered pair in the roster. Recomputed on every
/// call; nothing is cached.
pub fn team_compatibility(roster: &[TeamMember]) -> TeamCompatibilityReport {
    let mut pairs = Vec::new();
    for (index, first) in roster.iter().enumerate() {
        for second in &roster[index + 1..] {
            pairs.push(PairCompatibility {
                member_a: first.id.clone(),
                member_b: second.id.clone(),
                matrix: compare_profiles(&first.profile, &second.profile),
            });
        }
    }

    let average_compatibility = if pairs.is_empty() {
        None
    } else {
        Some(
            pairs
                .iter()
                .map(|pair| pair.matrix.overall_compatibility)
                .sum::<f64>()
                / pairs.len() as f64,
        )
    };

    let by_score = |left: &&PairCompatibility, right: &&PairCompatibility| {
        left.matrix
            .overall_compatibility
            .total_cmp(&right.matrix.overall_compatibility)
    };
    let strongest_pair = pairs
        .iter()
        .max_by(by_score)
        .map(|pair| (pair.member_a.clone(), pair.member_b.clone()));
    let weakest_pair = pairs
        .iter()
        .min_by(by_score)
        .map(|pair| (pair.member_a.clone(), pair.member_b.clone()));

    TeamCompatibilityReport {
        pairs,
        average_compatibility,
        strongest_pair,
        weakest_pair,
    }
}
