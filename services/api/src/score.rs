use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use talent_assess::config::AppConfig;
use talent_assess::error::AppError;
use talent_assess::matching::{match_careers, CareerMatch};
use talent_assess::scoring::{calculate_final_results, AssessmentData, AssessmentKind, AssessmentResults};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum KindArg {
    #[default]
    CareerReadiness,
    CommunicationStyle,
}

impl From<KindArg> for AssessmentKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::CareerReadiness => AssessmentKind::CareerReadiness,
            KindArg::CommunicationStyle => AssessmentKind::CommunicationStyle,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to an assessment data JSON file (careerSwipes, skillsChallenges, workScenarios, rapidFire)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Which assessment the data belongs to
    #[arg(long, value_enum, default_value_t = KindArg::CareerReadiness)]
    pub(crate) kind: KindArg,
    /// Wall-clock completion time in milliseconds, used for validity checks
    #[arg(long, default_value_t = 0)]
    pub(crate) elapsed_ms: u64,
    /// Include ranked career matches in the output
    #[arg(long)]
    pub(crate) matches: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScoreOutput {
    pub(crate) results: AssessmentResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) career_matches: Option<Vec<CareerMatch>>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let output = score_json(&raw, args.kind.into(), args.elapsed_ms, args.matches)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) fn score_json(
    raw: &str,
    kind: AssessmentKind,
    elapsed_ms: u64,
    with_matches: bool,
) -> Result<ScoreOutput, AppError> {
    let data: AssessmentData = serde_json::from_str(raw)?;
    let results = calculate_final_results(kind, &data, elapsed_ms);

    let career_matches = if with_matches {
        let catalog = AppConfig::load()?.catalog.load()?;
        Some(match_careers(
            &catalog,
            &results,
            &data.career_swipes,
            &data.rapid_fire,
        ))
    } else {
        None
    };

    Ok(ScoreOutput {
        results,
        career_matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_camel_case_payloads() {
        let raw = r#"{
            "careerSwipes": [{"category": "science", "action": "like"}],
            "rapidFire": [{"dimension": "pace", "choice": "B"}]
        }"#;

        let output = score_json(raw, AssessmentKind::CareerReadiness, 20_000, false)
            .expect("scores");

        assert_eq!(output.results.dimensions.len(), 8);
        assert!(output.career_matches.is_none());
    }

    #[test]
    fn malformed_json_is_a_payload_error() {
        match score_json("[", AssessmentKind::CareerReadiness, 0, false) {
            Err(AppError::Payload(_)) => {}
            other => panic!("expected payload error, got {other:?}"),
        }
    }
}
