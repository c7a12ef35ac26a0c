use std::collections::BTreeMap;

use super::super::domain::{ChallengeScore, Department, SkillsChallenge};
use super::DEFAULT_LOW_SCORE;

const DEPARTMENT_CREDIT: f64 = 20.0;
const BUDGET_TOTAL: f64 = 100_000.0;
const CREDIT_DECAY_UNIT: f64 = 1_000.0;

const COMMON_USES: [&str; 10] = [
    "hold paper",
    "paper clip",
    "clip paper",
    "bookmark",
    "hook",
    "key ring",
    "keychain",
    "pick a lock",
    "reset button",
    "zipper pull",
];

const POSITIVE_KEYWORDS: [&str; 10] = [
    "understand",
    "appreciate",
    "apologize",
    "sorry",
    "thank",
    "help",
    "solution",
    "resolve",
    "together",
    "support",
];

const NEGATIVE_KEYWORDS: [&str; 8] = [
    "fault",
    "blame",
    "impossible",
    "can't",
    "won't",
    "not my problem",
    "policy says",
    "should have",
];

const TIMELINE_PHRASES: [&str; 3] = ["timeline", "next step", "by end of"];
const FOLLOW_UP_PHRASES: [&str; 2] = ["follow", "update"];

const EXPECTED_INSIGHTS: [&str; 5] = ["seasonal", "decline", "growth", "correlation", "outlier"];

/// Scores one challenge according to its type.
pub fn score_challenge(challenge: &SkillsChallenge) -> f64 {
    let score = match challenge {
        SkillsChallenge::ProblemSolving {
            allocation: Some(allocation),
            departments,
            total_allocated,
        } => problem_solving(allocation, departments, *total_allocated),
        SkillsChallenge::CreativeThinking { ideas: Some(ideas) } => creative_thinking(ideas),
        SkillsChallenge::Communication {
            response: Some(response),
        } => communication(response),
        SkillsChallenge::Analytical {
            insights: Some(insights),
        } => analytical(insights),
        _ => DEFAULT_LOW_SCORE,
    };

    score.clamp(0.0, 100.0)
}

pub fn challenge_scores(challenges: &[SkillsChallenge]) -> Vec<ChallengeScore> {
    challenges
        .iter()
        .map(|challenge| ChallengeScore {
            challenge_type: challenge.kind_label().to_string(),
            score: score_challenge(challenge).round(),
        })
        .collect()
}

/// Mean challenge score; the low default when nothing was attempted.
pub fn skill_readiness(challenges: &[SkillsChallenge]) -> f64 {
    if challenges.is_empty() {
        return DEFAULT_LOW_SCORE;
    }

    let total: f64 = challenges.iter().map(score_challenge).sum();
    total / challenges.len() as f64
}

/// Budget allocation exercise.
///
/// Each department earns 20 points inside its optimal range, otherwise
/// `20 - distance / 1000` floored at zero. Missing a 100k total costs
/// `|total - 100000| / 1000`.
pub fn problem_solving(
    allocation: &BTreeMap<String, f64>,
    departments: &[Department],
    total_allocated: Option<f64>,
) -> f64 {
    let mut score = 0.0;

    for department in departments {
        let amount = allocation.get(&department.name).copied().unwrap_or(0.0);
        let (low, high) = ordered_range(department.optimal_range);

        if amount >= low && amount <= high {
            score += DEPARTMENT_CREDIT;
        } else {
            let distance = if amount < low {
                low - amount
            } else {
                amount - high
            };
            score += (DEPARTMENT_CREDIT - distance / CREDIT_DECAY_UNIT).max(0.0);
        }
    }

    let total = total_allocated.unwrap_or_else(|| allocation.values().sum());
    score -= (total - BUDGET_TOTAL).abs() / CREDIT_DECAY_UNIT;

    score.clamp(0.0, 100.0)
}

fn ordered_range((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Alternative-uses exercise: `0.4 * fluency + 0.4 * originality + 0.2 * elaboration`.
pub fn creative_thinking(ideas: &[String]) -> f64 {
    let ideas: Vec<String> = ideas
        .iter()
        .map(|idea| idea.trim().to_lowercase())
        .filter(|idea| !idea.is_empty())
        .collect();

    if ideas.is_empty() {
        return 0.0;
    }

    let count = ideas.len() as f64;
    let fluency = (count / 10.0).min(1.0) * 100.0;

    let original = ideas
        .iter()
        .filter(|idea| !COMMON_USES.iter().any(|common| idea.contains(common)))
        .count() as f64;
    let originality = original / count * 100.0;

    let elaborated = ideas
        .iter()
        .filter(|idea| idea.split_whitespace().count() >= 4)
        .count() as f64;
    let elaboration = elaborated / count * 100.0;

    0.4 * fluency + 0.4 * originality + 0.2 * elaboration
}

/// Customer message rewrite, scored on tone keywords and follow-through.
pub fn communication(response: &str) -> f64 {
    let text = response.to_lowercase();
    if text.trim().is_empty() {
        return 0.0;
    }

    let positive_hits = POSITIVE_KEYWORDS
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count() as f64;
    let coverage = positive_hits / POSITIVE_KEYWORDS.len() as f64;
    let mut score = coverage * 40.0;

    let negative_hits = NEGATIVE_KEYWORDS
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count() as f64;
    score += (30.0 - negative_hits * 10.0).max(0.0);

    if TIMELINE_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        score += 15.0;
    }
    if FOLLOW_UP_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        score += 15.0;
    }

    score.min(100.0)
}

/// Data interpretation exercise: 20 points per expected insight found.
pub fn analytical(insights: &[String]) -> f64 {
    let text = insights.join(" ").to_lowercase();
    let matched = EXPECTED_INSIGHTS
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count() as f64;

    (matched * 20.0).min(100.0)
}
