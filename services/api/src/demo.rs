use crate::infra::{InMemoryReportPublisher, InMemoryResultRepository};
use clap::Args;
use std::collections::BTreeMap;
use std::sync::Arc;
use talent_assess::assessments::{AssessmentService, AssessmentSubmission, CandidateInfo};
use talent_assess::config::AppConfig;
use talent_assess::error::AppError;
use talent_assess::matching::{CommunicationProfile, TeamMember};
use talent_assess::scoring::{
    AssessmentData, AssessmentKind, AssessmentResults, CareerSwipe, Department, Dimension,
    ForcedChoice, RapidFireResponse, ScenarioOption, SkillsChallenge, SwipeAction, WorkScenario,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Candidate name shown in the demo output.
    #[arg(long, default_value = "Avery Chen")]
    pub(crate) candidate: String,
    /// Number of career matches to print.
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
    /// Skip the team compatibility portion of the demo.
    #[arg(long)]
    pub(crate) skip_team: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        candidate,
        top,
        skip_team,
    } = args;

    let catalog = AppConfig::load()?.catalog.load()?;
    let reports = Arc::new(InMemoryReportPublisher::default());
    let service = AssessmentService::new(
        Arc::new(InMemoryResultRepository::default()),
        reports.clone(),
        catalog,
    );

    println!("Assessment scoring demo");
    let record = service.submit(AssessmentSubmission {
        candidate: CandidateInfo {
            name: candidate,
            email: None,
            target_role: None,
        },
        kind: AssessmentKind::CareerReadiness,
        data: sample_data(),
        questions: Vec::new(),
        answers: Vec::new(),
        elapsed_ms: Some(9 * 60 * 1000),
    })?;

    render_results(&record.candidate.name, &record.results);

    let matches = service.career_matches(&record.id)?;
    println!("\nTop career matches");
    for entry in matches.iter().take(top) {
        println!(
            "  {:>3}%  {:<24} {:<18} {}",
            entry.match_percentage,
            entry.title,
            entry.readiness_level.label(),
            entry.salary_expectation
        );
        if !entry.skill_gaps.is_empty() {
            println!("        gaps: {}", entry.skill_gaps.join(", "));
        }
        if let Some(step) = entry.development_path.first() {
            println!("        next: {step}");
        }
    }

    if !skip_team {
        let report = service.team_compatibility(&record.id, sample_roster())?;
        println!("\nTeam compatibility");
        for pair in &report.pairs {
            println!(
                "  {} <> {}: {:.0} (style {:.0}, synergy {:.0}, conflict {:.0})",
                pair.member_a,
                pair.member_b,
                pair.matrix.overall_compatibility,
                pair.matrix.working_style_match,
                pair.matrix.communication_synergy,
                pair.matrix.conflict_potential
            );
        }
        if let Some(average) = report.average_compatibility {
            println!("  team average: {average:.1}");
        }
    }

    let templates: Vec<String> = reports
        .requests()
        .into_iter()
        .map(|request| request.template)
        .collect();
    println!("\nQueued reports: {}", templates.join(", "));

    Ok(())
}

fn render_results(name: &str, results: &AssessmentResults) {
    let readiness = &results.career_readiness;
    println!(
        "{} | {}: {:.1} overall, {} ({}th percentile)",
        name,
        results.kind.label(),
        results.overall_score,
        readiness.level,
        readiness.percentile
    );
    println!(
        "Validity: {:?}, {:.1}s per item, engagement {:?}",
        results.validity_metrics.validity_status,
        results.validity_metrics.response_time_seconds,
        results.validity_metrics.engagement_level
    );

    println!("\nDimensions");
    for (dimension, entry) in &results.dimensions {
        println!(
            "  {:<22} {:>5.0}  {:?}",
            dimension.label(),
            entry.score,
            entry.level
        );
    }

    if !readiness.strengths.is_empty() {
        println!("Strengths: {}", readiness.strengths.join(", "));
    }
    if !readiness.development_areas.is_empty() {
        println!("Development areas: {}", readiness.development_areas.join(", "));
    }
}

fn scenario(id: &str, chosen: &[(&str, f64)], alternative: &[(&str, f64)]) -> WorkScenario {
    let scores = |points: &[(&str, f64)]| -> BTreeMap<String, f64> {
        points
            .iter()
            .map(|(key, value)| ((*key).to_string(), *value))
            .collect()
    };

    WorkScenario {
        scenario_id: Some(id.to_string()),
        user_choice: Some("a".to_string()),
        options: vec![
            ScenarioOption {
                id: "a".to_string(),
                scores: scores(chosen),
            },
            ScenarioOption {
                id: "b".to_string(),
                scores: scores(alternative),
            },
        ],
    }
}

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

pub(crate) fn sample_data() -> AssessmentData {
    AssessmentData {
        career_swipes: vec![
            swipe("technology", SwipeAction::Like),
            swipe("technology", SwipeAction::Like),
            swipe("science", SwipeAction::Like),
            swipe("healthcare", SwipeAction::Dislike),
            swipe("business", SwipeAction::Dislike),
            swipe("science", SwipeAction::Dislike),
        ],
        skills_challenges: vec![
            SkillsChallenge::ProblemSolving {
                allocation: Some(BTreeMap::from([
                    ("Engineering".to_string(), 45_000.0),
                    ("Marketing".to_string(), 30_000.0),
                    ("Support".to_string(), 25_000.0),
                ])),
                departments: vec![
                    Department {
                        name: "Engineering".to_string(),
                        optimal_range: (35_000.0, 50_000.0),
                    },
                    Department {
                        name: "Marketing".to_string(),
                        optimal_range: (20_000.0, 30_000.0),
                    },
                    Department {
                        name: "Support".to_string(),
                        optimal_range: (15_000.0, 25_000.0),
                    },
                ],
                total_allocated: Some(100_000.0),
            },
            SkillsChallenge::CreativeThinking {
                ideas: Some(vec![
                    "Bend into a tiny phone stand for video calls".to_string(),
                    "Use as a zipper pull".to_string(),
                    "Shape into a cable organiser clip for the desk".to_string(),
                    "Make a miniature sculpture for a coworker".to_string(),
                    "Clean grooves on a keyboard".to_string(),
                ]),
            },
            SkillsChallenge::Communication {
                response: Some(
                    "Thank you for your patience, I understand how frustrating this is. \
                     I will resolve it together with our support team and send an update \
                     with a timeline by end of day."
                        .to_string(),
                ),
            },
            SkillsChallenge::Analytical {
                insights: Some(vec![
                    "Clear seasonal spike in Q4".to_string(),
                    "Growth in returning users correlates with onboarding emails".to_string(),
                ]),
            },
        ],
        work_scenarios: vec![
            scenario(
                "deadline-conflict",
                &[("leadership", 3.0), ("communication", 4.0)],
                &[("leadership", -1.0)],
            ),
            scenario(
                "new-tooling",
                &[("adaptability", 4.0), ("problem_solving", 3.0)],
                &[("adaptability", 0.0)],
            ),
            scenario(
                "peer-struggling",
                &[("teamwork", 5.0), ("work_ethic", 2.0)],
                &[("work_ethic", 4.0)],
            ),
        ],
        rapid_fire: vec![
            pick("pace", ForcedChoice::B),
            pick("collaboration", ForcedChoice::B),
            pick("structure", ForcedChoice::B),
            pick("focus", ForcedChoice::B),
            pick("pace", ForcedChoice::A),
            pick("collaboration", ForcedChoice::B),
            pick("focus", ForcedChoice::B),
            pick("structure", ForcedChoice::A),
        ],
    }
}

fn sample_roster() -> Vec<TeamMember> {
    let member = |id: &str, name: &str, scores: &[(Dimension, f64)]| TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        profile: CommunicationProfile {
            dimensions: scores.iter().copied().collect(),
        },
    };

    vec![
        member(
            "tm-rivera",
            "Dana Rivera",
            &[
                (Dimension::Assertiveness, 78.0),
                (Dimension::Expressiveness, 72.0),
                (Dimension::ActiveListening, 55.0),
                (Dimension::EmotionalIntelligence, 66.0),
            ],
        ),
        member(
            "tm-osei",
            "Kwame Osei",
            &[
                (Dimension::ActiveListening, 82.0),
                (Dimension::InformationProcessing, 76.0),
                (Dimension::ConflictManagement, 74.0),
                (Dimension::EmotionalIntelligence, 71.0),
            ],
        ),
    ]
}
