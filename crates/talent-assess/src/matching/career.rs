use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{CareerCatalog, CareerCategory, CareerProfile, GENERIC_COMPETENCIES};
use crate::scoring::domain::{
    AssessmentResults, CareerSwipe, Dimension, ForcedChoice, RapidFireResponse, SwipeAction,
};
use crate::scoring::scorers::{tally, NEUTRAL_SCORE};

pub const MATCH_LIMIT: usize = 8;

const INTEREST_WEIGHT: f64 = 25.0;
const SKILLS_WEIGHT: f64 = 30.0;
const WORK_STYLE_WEIGHT: f64 = 20.0;
const COMPETENCY_WEIGHT: f64 = 25.0;
const MAX_MATCH_POINTS: f64 = INTEREST_WEIGHT + SKILLS_WEIGHT + WORK_STYLE_WEIGHT + COMPETENCY_WEIGHT;

const COMPLEXITY_OFFSET: f64 = 10.0;
const GAP_THRESHOLD: f64 = 60.0;
const ALIGNMENT_THRESHOLD: f64 = 70.0;

/// Work-style poles captured by the rapid-fire stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStyleTag {
    FastPaced,
    Steady,
    Team,
    Independent,
    Structured,
    Flexible,
    People,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStyleAxis {
    Pace,
    Collaboration,
    Structure,
    Focus,
}

impl WorkStyleAxis {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "pace" | "work_pace" => Some(Self::Pace),
            "collaboration" | "team_orientation" => Some(Self::Collaboration),
            "structure" | "work_structure" => Some(Self::Structure),
            "focus" | "work_focus" => Some(Self::Focus),
            _ => None,
        }
    }

    pub const fn pole(self, choice: ForcedChoice) -> WorkStyleTag {
        match (self, choice) {
            (Self::Pace, ForcedChoice::A) => WorkStyleTag::FastPaced,
            (Self::Pace, ForcedChoice::B) => WorkStyleTag::Steady,
            (Self::Collaboration, ForcedChoice::A) => WorkStyleTag::Team,
            (Self::Collaboration, ForcedChoice::B) => WorkStyleTag::Independent,
            (Self::Structure, ForcedChoice::A) => WorkStyleTag::Structured,
            (Self::Structure, ForcedChoice::B) => WorkStyleTag::Flexible,
            (Self::Focus, ForcedChoice::A) => WorkStyleTag::People,
            (Self::Focus, ForcedChoice::B) => WorkStyleTag::Data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Prefers(WorkStyleTag),
    Balanced,
}

/// Expected work style per axis for a career family.
pub fn expected_work_style(category: CareerCategory, axis: WorkStyleAxis) -> Expectation {
    use Expectation::{Balanced, Prefers};
    use WorkStyleAxis::*;
    use WorkStyleTag::*;

    match (category, axis) {
        (CareerCategory::Technology, Pace) => Balanced,
        (CareerCategory::Technology, Collaboration) => Prefers(Independent),
        (CareerCategory::Technology, Structure) => Prefers(Flexible),
        (CareerCategory::Technology, Focus) => Prefers(Data),
        (CareerCategory::Healthcare, Pace) => Prefers(FastPaced),
        (CareerCategory::Healthcare, Collaboration) => Prefers(Team),
        (CareerCategory::Healthcare, Structure) => Prefers(Structured),
        (CareerCategory::Healthcare, Focus) => Prefers(People),
        (CareerCategory::Business, Pace) => Prefers(FastPaced),
        (CareerCategory::Business, Collaboration) => Prefers(Team),
        (CareerCategory::Business, Structure) => Balanced,
        (CareerCategory::Business, Focus) => Prefers(People),
        (CareerCategory::Creative, Collaboration) => Prefers(Independent),
        (CareerCategory::Creative, Structure) => Prefers(Flexible),
        (CareerCategory::Creative, _) => Balanced,
        (CareerCategory::Education, Pace) => Prefers(Steady),
        (CareerCategory::Education, Collaboration) => Prefers(Team),
        (CareerCategory::Education, Structure) => Prefers(Structured),
        (CareerCategory::Education, Focus) => Prefers(People),
        (CareerCategory::Science, Pace) => Prefers(Steady),
        (CareerCategory::Science, Collaboration) => Prefers(Independent),
        (CareerCategory::Science, Structure) => Prefers(Structured),
        (CareerCategory::Science, Focus) => Prefers(Data),
        (CareerCategory::Trades, Pace) => Prefers(Steady),
        (CareerCategory::Trades, Collaboration) => Prefers(Team),
        (CareerCategory::Trades, Structure) => Prefers(Structured),
        (CareerCategory::Trades, Focus) => Balanced,
        (CareerCategory::SocialServices, Pace) => Prefers(Steady),
        (CareerCategory::SocialServices, Collaboration) => Prefers(Team),
        (CareerCategory::SocialServices, Structure) => Prefers(Flexible),
        (CareerCategory::SocialServices, Focus) => Prefers(People),
        (CareerCategory::General, _) => Balanced,
    }
}

/// Majority pole per work-style axis. Ties and unknown dimensions are omitted.
pub fn work_style_preferences(
    rapid_fire: &[RapidFireResponse],
) -> BTreeMap<WorkStyleAxis, WorkStyleTag> {
    tally(rapid_fire)
        .into_iter()
        .filter_map(|entry| {
            let axis = WorkStyleAxis::parse(&entry.dimension)?;
            let choice = entry.majority()?;
            Some((axis, axis.pole(choice)))
        })
        .collect()
}

/// Fraction of stated preferences the career family agrees with.
///
/// A balanced expectation earns half credit; no stated preferences reads as
/// a neutral 0.5.
pub fn work_style_alignment(
    preferences: &BTreeMap<WorkStyleAxis, WorkStyleTag>,
    category: CareerCategory,
) -> f64 {
    if preferences.is_empty() {
        return 0.5;
    }

    let credit: f64 = preferences
        .iter()
        .map(|(axis, tag)| match expected_work_style(category, *axis) {
            Expectation::Balanced => 0.5,
            Expectation::Prefers(expected) if expected == *tag => 1.0,
            Expectation::Prefers(_) => 0.0,
        })
        .sum();

    credit / preferences.len() as f64
}

/// Like ratio for the career's family, neutral when it was never swiped.
pub fn category_interest_ratio(swipes: &[CareerSwipe], category: CareerCategory) -> f64 {
    let (likes, total) = swipes
        .iter()
        .filter(|swipe| category.matches(&swipe.category))
        .fold((0usize, 0usize), |(likes, total), swipe| {
            (
                likes + usize::from(swipe.action == SwipeAction::Like),
                total + 1,
            )
        });

    if total == 0 {
        0.5
    } else {
        likes as f64 / total as f64
    }
}

fn competencies_for(career: &CareerProfile) -> Vec<(Dimension, f64)> {
    let mut weights: Vec<(Dimension, f64)> = if career.competencies.is_empty() {
        GENERIC_COMPETENCIES.to_vec()
    } else {
        career
            .competencies
            .iter()
            .map(|(dimension, weight)| (*dimension, *weight))
            .collect()
    };
    weights.sort_by(|left, right| right.1.total_cmp(&left.1));
    weights
}

fn score_or_neutral(results: &AssessmentResults, dimension: Dimension) -> f64 {
    results
        .dimension_score(dimension)
        .unwrap_or(NEUTRAL_SCORE)
        .clamp(0.0, 100.0)
}

/// Weighted competency fit in `0..=1`.
pub fn competency_alignment(results: &AssessmentResults, career: &CareerProfile) -> f64 {
    let weights = competencies_for(career);
    let total_weight: f64 = weights.iter().map(|(_, weight)| weight).sum();
    if total_weight <= 0.0 {
        return 0.5;
    }

    let weighted: f64 = weights
        .iter()
        .map(|(dimension, weight)| score_or_neutral(results, *dimension) / 100.0 * weight)
        .sum();

    (weighted / total_weight).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualificationLevel {
    #[serde(rename = "Highly Qualified")]
    HighlyQualified,
    #[serde(rename = "Qualified")]
    Qualified,
    #[serde(rename = "Entry Level")]
    EntryLevel,
    #[serde(rename = "Needs Development")]
    NeedsDevelopment,
}

impl QualificationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighlyQualified => "Highly Qualified",
            Self::Qualified => "Qualified",
            Self::EntryLevel => "Entry Level",
            Self::NeedsDevelopment => "Needs Development",
        }
    }

    pub const fn salary_multiplier(self) -> f64 {
        match self {
            Self::HighlyQualified => 1.0,
            Self::Qualified => 0.9,
            Self::EntryLevel => 0.8,
            Self::NeedsDevelopment => 0.7,
        }
    }
}

/// Readiness for a specific career.
///
/// Complex careers raise the overall-score bar by 10 on every tier, and the
/// skills bar only on the top tier.
pub fn calculate_readiness_level(
    overall_score: f64,
    skills_score: f64,
    complex: bool,
) -> QualificationLevel {
    let offset = if complex { COMPLEXITY_OFFSET } else { 0.0 };

    if overall_score >= 85.0 + offset && skills_score >= 80.0 + offset {
        QualificationLevel::HighlyQualified
    } else if overall_score >= 70.0 + offset && skills_score >= 65.0 {
        QualificationLevel::Qualified
    } else if overall_score >= 50.0 + offset {
        QualificationLevel::EntryLevel
    } else {
        QualificationLevel::NeedsDevelopment
    }
}

/// Scales both ends of a salary range such as `"$60,000 - $95,000"`.
///
/// Returns the input unchanged when fewer than two amounts can be read.
pub fn adjust_salary(range: &str, level: QualificationLevel) -> String {
    let amounts = extract_amounts(range);
    if amounts.len() < 2 {
        return range.to_string();
    }

    let multiplier = level.salary_multiplier();
    format!(
        "${} - ${}",
        format_thousands((amounts[0] * multiplier).round()),
        format_thousands((amounts[1] * multiplier).round())
    )
}

/// Reads dollar amounts, expanding a `k` suffix. In a shorthand range such
/// as `"$60-95k"` a trailing `k` also covers the bare amounts before it.
fn extract_amounts(raw: &str) -> Vec<f64> {
    let mut amounts: Vec<(f64, bool)> = Vec::new();
    let mut digits = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_digit() || (ch == '.' && !digits.is_empty()) {
            digits.push(ch);
            continue;
        }
        if ch == ',' && !digits.is_empty() {
            continue;
        }
        if !digits.is_empty() {
            if let Ok(value) = digits.parse::<f64>() {
                amounts.push((value, matches!(ch, 'k' | 'K')));
            }
            digits.clear();
        }
    }
    if let Ok(value) = digits.parse::<f64>() {
        amounts.push((value, false));
    }

    let shorthand = amounts.last().is_some_and(|(_, thousands)| *thousands);
    amounts
        .into_iter()
        .map(|(value, thousands)| {
            if thousands || (shorthand && value < 1_000.0) {
                value * 1_000.0
            } else {
                value
            }
        })
        .collect()
}

fn format_thousands(value: f64) -> String {
    let whole = value.max(0.0) as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Ordered next steps built from sequential rules.
pub fn development_path(
    career: &CareerProfile,
    level: QualificationLevel,
    skill_gaps: &[String],
    career_clarity: f64,
) -> Vec<String> {
    let mut path = Vec::new();

    if level == QualificationLevel::NeedsDevelopment {
        path.push(format!(
            "Complete foundational coursework in {}",
            career.category.label()
        ));
    }

    for gap in skill_gaps.iter().take(2) {
        path.push(format!("Strengthen {gap} through targeted practice projects"));
    }

    if career.complex {
        path.push(format!(
            "Pursue the advanced certification or degree expected of a {}",
            career.title
        ));
    }

    if matches!(
        level,
        QualificationLevel::EntryLevel | QualificationLevel::NeedsDevelopment
    ) {
        path.push(format!(
            "Seek an internship or apprenticeship in {}",
            career.category.label()
        ));
    }

    if career_clarity < 50.0 {
        path.push(format!(
            "Job-shadow a {} to confirm your interest",
            career.title
        ));
    }

    match level {
        QualificationLevel::HighlyQualified | QualificationLevel::Qualified => {
            path.push(format!("Apply for {} roles", career.title));
        }
        QualificationLevel::EntryLevel | QualificationLevel::NeedsDevelopment => {
            path.push(format!(
                "Target entry-level {} roles within 12-18 months",
                career.title
            ));
        }
    }

    path
}

/// Points earned per component, each capped at its weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBreakdown {
    pub interest: f64,
    pub skills: f64,
    pub work_style: f64,
    pub competency: f64,
}

impl MatchBreakdown {
    pub fn total(&self) -> f64 {
        self.interest + self.skills + self.work_style + self.competency
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerMatch {
    pub title: String,
    pub category: CareerCategory,
    pub match_percentage: f64,
    pub fit_score: f64,
    pub readiness_level: QualificationLevel,
    pub skill_gaps: Vec<String>,
    pub strength_alignment: Vec<String>,
    pub salary_expectation: String,
    pub development_path: Vec<String>,
    pub breakdown: MatchBreakdown,
}

fn score_career(
    career: &CareerProfile,
    results: &AssessmentResults,
    swipes: &[CareerSwipe],
    preferences: &BTreeMap<WorkStyleAxis, WorkStyleTag>,
) -> CareerMatch {
    let skills_score = score_or_neutral(results, Dimension::SkillReadiness);

    let breakdown = MatchBreakdown {
        interest: (category_interest_ratio(swipes, career.category) * INTEREST_WEIGHT)
            .clamp(0.0, INTEREST_WEIGHT),
        skills: (skills_score / 100.0 * SKILLS_WEIGHT).clamp(0.0, SKILLS_WEIGHT),
        work_style: (work_style_alignment(preferences, career.category) * WORK_STYLE_WEIGHT)
            .clamp(0.0, WORK_STYLE_WEIGHT),
        competency: (competency_alignment(results, career) * COMPETENCY_WEIGHT)
            .clamp(0.0, COMPETENCY_WEIGHT),
    };

    let match_percentage = (breakdown.total() / MAX_MATCH_POINTS * 100.0)
        .clamp(0.0, 100.0)
        .round();
    let fit_score = ((breakdown.skills + breakdown.competency)
        / (SKILLS_WEIGHT + COMPETENCY_WEIGHT)
        * 100.0)
        .clamp(0.0, 100.0)
        .round();

    let readiness_level =
        calculate_readiness_level(results.overall_score, skills_score, career.complex);

    let competencies = competencies_for(career);
    let skill_gaps: Vec<String> = competencies
        .iter()
        .filter(|(dimension, _)| score_or_neutral(results, *dimension) < GAP_THRESHOLD)
        .map(|(dimension, _)| dimension.label())
        .collect();
    let strength_alignment: Vec<String> = competencies
        .iter()
        .filter(|(dimension, _)| score_or_neutral(results, *dimension) >= ALIGNMENT_THRESHOLD)
        .map(|(dimension, _)| dimension.label())
        .collect();

    let clarity = score_or_neutral(results, Dimension::CareerClarity);
    let development_path = development_path(career, readiness_level, &skill_gaps, clarity);

    CareerMatch {
        title: career.title.clone(),
        category: career.category,
        match_percentage,
        fit_score,
        readiness_level,
        skill_gaps,
        strength_alignment,
        salary_expectation: adjust_salary(&career.salary_range, readiness_level),
        development_path,
        breakdown,
    }
}

/// Ranks every career in `catalog` and keeps the best [`MATCH_LIMIT`].
pub fn match_careers(
    catalog: &CareerCatalog,
    results: &AssessmentResults,
    swipes: &[CareerSwipe],
    rapid_fire: &[RapidFireResponse],
) -> Vec<CareerMatch> {
    let preferences = work_style_preferences(rapid_fire);

    let mut matches: Vec<CareerMatch> = catalog
        .careers()
        .iter()
        .map(|career| score_career(career, results, swipes, &preferences))
        .collect();

    matches.sort_by(|left, right| right.match_percentage.total_cmp(&left.match_percentage));
    matches.truncate(MATCH_LIMIT);
    matches
}

/// Top matches against the built-in catalog.
pub fn calculate_career_matches(
    results: &AssessmentResults,
    swipes: &[CareerSwipe],
    rapid_fire: &[RapidFireResponse],
) -> Vec<CareerMatch> {
    match_careers(&CareerCatalog::standard(), results, swipes, rapid_fire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{calculate_final_results, AssessmentData, AssessmentKind};

    fn swipe(category: &str, action: SwipeAction) -> CareerSwipe {
        CareerSwipe {
            category: category.to_string(),
            action,
        }
    }

    fn pick(dimension: &str, choice: ForcedChoice) -> RapidFireResponse {
        RapidFireResponse {
            dimension: dimension.to_string(),
            choice,
        }
    }

    #[test]
    fn readiness_level_matches_documented_thresholds() {
        assert_eq!(
            calculate_readiness_level(85.0, 80.0, false),
            QualificationLevel::HighlyQualified
        );
        assert_ne!(
            calculate_readiness_level(85.0, 80.0, true),
            QualificationLevel::HighlyQualified
        );
        assert_eq!(
            calculate_readiness_level(95.0, 90.0, true),
            QualificationLevel::HighlyQualified
        );
        assert_eq!(
            calculate_readiness_level(80.0, 65.0, true),
            QualificationLevel::Qualified
        );
        assert_eq!(
            calculate_readiness_level(55.0, 20.0, true),
            QualificationLevel::NeedsDevelopment
        );
        assert_eq!(
            calculate_readiness_level(55.0, 20.0, false),
            QualificationLevel::EntryLevel
        );
    }

    #[test]
    fn salary_is_scaled_by_readiness() {
        assert_eq!(
            adjust_salary("$85,000 - $140,000", QualificationLevel::Qualified),
            "$76,500 - $126,000"
        );
        assert_eq!(
            adjust_salary("$60k-$95k", QualificationLevel::NeedsDevelopment),
            "$42,000 - $66,500"
        );
        assert_eq!(
            adjust_salary("Competitive", QualificationLevel::EntryLevel),
            "Competitive"
        );
    }

    #[test]
    fn shorthand_salary_range_shares_its_thousands_suffix() {
        assert_eq!(
            adjust_salary("$60-95k", QualificationLevel::Qualified),
            "$54,000 - $85,500"
        );
        assert_eq!(
            adjust_salary("$60,000 - 95k", QualificationLevel::HighlyQualified),
            "$60,000 - $95,000"
        );
    }

    #[test]
    fn work_style_alignment_gives_half_credit_for_balanced() {
        let preferences = work_style_preferences(&[
            pick("pace", ForcedChoice::A),
            pick("pace", ForcedChoice::A),
            pick("focus", ForcedChoice::B),
        ]);

        assert_eq!(preferences.len(), 2);
        // Technology: balanced pace (0.5) and data focus (1.0).
        let alignment = work_style_alignment(&preferences, CareerCategory::Technology);
        assert!((alignment - 0.75).abs() < 1e-9);
        assert_eq!(work_style_alignment(&BTreeMap::new(), CareerCategory::Science), 0.5);
    }

    #[test]
    fn tied_rapid_fire_axes_state_no_preference() {
        let preferences = work_style_preferences(&[
            pick("structure", ForcedChoice::A),
            pick("structure", ForcedChoice::B),
            pick("humor", ForcedChoice::A),
        ]);
        assert!(preferences.is_empty());
    }

    #[test]
    fn matches_are_sorted_and_limited() {
        let data = AssessmentData::default();
        let results = calculate_final_results(AssessmentKind::CareerReadiness, &data, 0);
        let swipes = vec![
            swipe("technology", SwipeAction::Like),
            swipe("healthcare", SwipeAction::Dislike),
        ];

        let matches = calculate_career_matches(&results, &swipes, &[]);

        assert_eq!(matches.len(), MATCH_LIMIT);
        assert!(matches
            .windows(2)
            .all(|pair| pair[0].match_percentage >= pair[1].match_percentage));
        assert!(matches.iter().all(|entry| entry.category != CareerCategory::Healthcare
            || entry.breakdown.interest == 0.0));
    }

    #[test]
    fn generic_weighting_applies_without_competencies() {
        let results =
            calculate_final_results(AssessmentKind::CareerReadiness, &AssessmentData::default(), 0);
        let catalog = CareerCatalog::standard();
        let strategist = catalog.find("Content Strategist").expect("present");

        let alignment = competency_alignment(&results, strategist);

        // skill readiness defaults to 30, every other generic dimension to 50
        let expected = (0.30 * 0.30 + 0.70 * 0.50) / 1.0;
        assert!((alignment - expected).abs() < 1e-9);
    }

    #[test]
    fn development_path_closes_with_application_step() {
        let catalog = CareerCatalog::standard();
        let career = catalog.find("Registered Nurse").expect("present");
        let path = development_path(
            career,
            QualificationLevel::NeedsDevelopment,
            &["Teamwork".to_string()],
            30.0,
        );

        assert!(path[0].starts_with("Complete foundational coursework"));
        assert!(path.iter().any(|step| step.contains("Teamwork")));
        assert!(path.iter().any(|step| step.contains("certification")));
        assert!(path.iter().any(|step| step.contains("Job-shadow")));
        assert!(path
            .last()
            .expect("path not empty")
            .starts_with("Target entry-level"));
    }
}
