use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Named trait or competency scored by an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    CareerClarity,
    SkillReadiness,
    ProblemSolving,
    Leadership,
    Teamwork,
    Communication,
    Adaptability,
    WorkEthic,
    Assertiveness,
    Expressiveness,
    InformationProcessing,
    ActiveListening,
    ConflictManagement,
    EmotionalIntelligence,
}

impl Dimension {
    pub const ALL: [Dimension; 14] = [
        Self::CareerClarity,
        Self::SkillReadiness,
        Self::ProblemSolving,
        Self::Leadership,
        Self::Teamwork,
        Self::Communication,
        Self::Adaptability,
        Self::WorkEthic,
        Self::Assertiveness,
        Self::Expressiveness,
        Self::InformationProcessing,
        Self::ActiveListening,
        Self::ConflictManagement,
        Self::EmotionalIntelligence,
    ];

    /// Identifier form used in payloads and weight tables.
    pub const fn key(self) -> &'static str {
        match self {
            Self::CareerClarity => "career_clarity",
            Self::SkillReadiness => "skill_readiness",
            Self::ProblemSolving => "problem_solving",
            Self::Leadership => "leadership",
            Self::Teamwork => "teamwork",
            Self::Communication => "communication",
            Self::Adaptability => "adaptability",
            Self::WorkEthic => "work_ethic",
            Self::Assertiveness => "assertiveness",
            Self::Expressiveness => "expressiveness",
            Self::InformationProcessing => "information_processing",
            Self::ActiveListening => "active_listening",
            Self::ConflictManagement => "conflict_management",
            Self::EmotionalIntelligence => "emotional_intelligence",
        }
    }

    /// Human readable title case name for reports.
    pub fn label(self) -> String {
        humanize(self.key())
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|dimension| dimension.key() == normalized)
    }
}

/// Turns `snake_case` identifiers into `Title Case`.
pub fn humanize(identifier: &str) -> String {
    identifier
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Which question set the candidate completed; each has a fixed weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    #[default]
    CareerReadiness,
    CommunicationStyle,
}

const CAREER_READINESS_WEIGHTS: [(Dimension, f64); 8] = [
    (Dimension::CareerClarity, 0.15),
    (Dimension::SkillReadiness, 0.20),
    (Dimension::ProblemSolving, 0.10),
    (Dimension::Leadership, 0.15),
    (Dimension::Teamwork, 0.10),
    (Dimension::Communication, 0.10),
    (Dimension::Adaptability, 0.10),
    (Dimension::WorkEthic, 0.10),
];

const COMMUNICATION_STYLE_WEIGHTS: [(Dimension, f64); 7] = [
    (Dimension::Assertiveness, 0.15),
    (Dimension::Expressiveness, 0.15),
    (Dimension::InformationProcessing, 0.15),
    (Dimension::ActiveListening, 0.15),
    (Dimension::ConflictManagement, 0.15),
    (Dimension::Adaptability, 0.10),
    (Dimension::EmotionalIntelligence, 0.15),
];

impl AssessmentKind {
    pub const fn weights(self) -> &'static [(Dimension, f64)] {
        match self {
            Self::CareerReadiness => &CAREER_READINESS_WEIGHTS,
            Self::CommunicationStyle => &COMMUNICATION_STYLE_WEIGHTS,
        }
    }

    pub fn weight_of(self, dimension: Dimension) -> Option<f64> {
        self.weights()
            .iter()
            .find(|(candidate, _)| *candidate == dimension)
            .map(|(_, weight)| *weight)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CareerReadiness => "Career Readiness",
            Self::CommunicationStyle => "Communication Style",
        }
    }

    pub fn level_for(self, score: f64) -> DimensionLevel {
        match self {
            Self::CareerReadiness => {
                if score >= 90.0 {
                    DimensionLevel::Expert
                } else if score >= 75.0 {
                    DimensionLevel::Advanced
                } else if score >= 60.0 {
                    DimensionLevel::Proficient
                } else if score >= 40.0 {
                    DimensionLevel::Developing
                } else {
                    DimensionLevel::Novice
                }
            }
            Self::CommunicationStyle => {
                if score >= 70.0 {
                    DimensionLevel::High
                } else if score >= 40.0 {
                    DimensionLevel::Moderate
                } else {
                    DimensionLevel::Low
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Dislike,
}

/// One card swiped during the career-interest stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerSwipe {
    pub category: String,
    pub action: SwipeAction,
}

/// Department with the allocation band that earns full credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub name: String,
    pub optimal_range: (f64, f64),
}

/// Skills challenge payloads, discriminated by `type`.
///
/// Deserialization never fails: a missing, null or unrecognised `type`
/// yields [`SkillsChallenge::Unknown`], and a field of the wrong shape reads
/// as absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillsChallenge {
    #[serde(rename_all = "camelCase")]
    ProblemSolving {
        allocation: Option<BTreeMap<String, f64>>,
        departments: Vec<Department>,
        total_allocated: Option<f64>,
    },
    CreativeThinking {
        ideas: Option<Vec<String>>,
    },
    Communication {
        response: Option<String>,
    },
    Analytical {
        insights: Option<Vec<String>>,
    },
    Unknown,
}

impl<'de> Deserialize<'de> for SkillsChallenge {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}

impl SkillsChallenge {
    fn from_value(value: &Value) -> Self {
        match value.get("type").and_then(Value::as_str) {
            Some("problem_solving") => Self::ProblemSolving {
                allocation: field(value, "allocation"),
                departments: field(value, "departments").unwrap_or_default(),
                total_allocated: field(value, "totalAllocated"),
            },
            Some("creative_thinking") => Self::CreativeThinking {
                ideas: field(value, "ideas"),
            },
            Some("communication") => Self::Communication {
                response: field(value, "response"),
            },
            Some("analytical") => Self::Analytical {
                insights: field(value, "insights"),
            },
            _ => Self::Unknown,
        }
    }

    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::ProblemSolving { .. } => "problem_solving",
            Self::CreativeThinking { .. } => "creative_thinking",
            Self::Communication { .. } => "communication",
            Self::Analytical { .. } => "analytical",
            Self::Unknown => "unknown",
        }
    }
}

fn field<T: DeserializeOwned>(value: &Value, name: &str) -> Option<T> {
    value
        .get(name)
        .and_then(|raw| T::deserialize(raw).ok())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOption {
    pub id: String,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

/// Workplace scenario with the option the candidate picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkScenario {
    #[serde(default)]
    pub scenario_id: Option<String>,
    #[serde(default)]
    pub user_choice: Option<String>,
    #[serde(default)]
    pub options: Vec<ScenarioOption>,
}

impl WorkScenario {
    pub fn chosen_option(&self) -> Option<&ScenarioOption> {
        let choice = self.user_choice.as_deref()?;
        self.options.iter().find(|option| option.id == choice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForcedChoice {
    A,
    B,
}

/// A single A/B pick from the rapid-fire stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RapidFireResponse {
    pub dimension: String,
    pub choice: ForcedChoice,
}

/// Everything the candidate answered in one sitting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentData {
    #[serde(default)]
    pub career_swipes: Vec<CareerSwipe>,
    #[serde(default)]
    pub skills_challenges: Vec<SkillsChallenge>,
    #[serde(default)]
    pub work_scenarios: Vec<WorkScenario>,
    #[serde(default)]
    pub rapid_fire: Vec<RapidFireResponse>,
}

impl AssessmentData {
    pub fn item_count(&self) -> usize {
        self.career_swipes.len()
            + self.skills_challenges.len()
            + self.work_scenarios.len()
            + self.rapid_fire.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimensionLevel {
    Novice,
    Developing,
    Proficient,
    Advanced,
    Expert,
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: f64,
    pub weight: f64,
    pub level: DimensionLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidityStatus {
    Valid,
    Questionable,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityFlag {
    TooFast,
    TooSlow,
    StraightLining,
}

impl ValidityFlag {
    pub const fn weight(self) -> u32 {
        match self {
            Self::TooFast => 2,
            Self::TooSlow => 1,
            Self::StraightLining => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityMetrics {
    pub response_time_seconds: f64,
    pub consistency_score: f64,
    pub engagement_level: EngagementLevel,
    pub validity_status: ValidityStatus,
    #[serde(default)]
    pub flags: Vec<ValidityFlag>,
    pub rapid_fire_consistency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessTier {
    Highly,
    Ready,
    Developing,
    NotReady,
}

impl ReadinessTier {
    pub const fn label(self, kind: AssessmentKind) -> &'static str {
        match (kind, self) {
            (AssessmentKind::CareerReadiness, Self::Highly) => "Highly Ready",
            (AssessmentKind::CareerReadiness, Self::Ready) => "Ready",
            (AssessmentKind::CareerReadiness, Self::Developing) => "Developing",
            (AssessmentKind::CareerReadiness, Self::NotReady) => "Not Ready",
            (AssessmentKind::CommunicationStyle, Self::Highly) => "Highly Effective",
            (AssessmentKind::CommunicationStyle, Self::Ready) => "Effective",
            (AssessmentKind::CommunicationStyle, Self::Developing) => "Developing",
            (AssessmentKind::CommunicationStyle, Self::NotReady) => "Needs Development",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerReadiness {
    pub level: String,
    pub tier: ReadinessTier,
    pub percentile: f64,
    pub strengths: Vec<String>,
    pub development_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeScore {
    pub challenge_type: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInterest {
    pub category: String,
    pub likes: usize,
    pub total: usize,
    pub like_ratio: f64,
}

/// Aggregate root handed to report renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResults {
    #[serde(default)]
    pub kind: AssessmentKind,
    pub overall_score: f64,
    pub dimensions: BTreeMap<Dimension, DimensionScore>,
    pub validity_metrics: ValidityMetrics,
    pub career_readiness: CareerReadiness,
    #[serde(default)]
    pub challenge_scores: Vec<ChallengeScore>,
    #[serde(default)]
    pub category_interest: Vec<CategoryInterest>,
}

impl AssessmentResults {
    pub fn dimension_score(&self, dimension: Dimension) -> Option<f64> {
        self.dimensions.get(&dimension).map(|entry| entry.score)
    }
}
