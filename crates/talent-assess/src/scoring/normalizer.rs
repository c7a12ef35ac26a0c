//! Turns loosely shaped UI answer records into typed per-question signals.
//!
//! Nothing here fails: a payload that does not fit its question type becomes
//! [`QuestionSignal::Unanswered`] and unparseable numbers are dropped.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{
    AssessmentData, Department, ForcedChoice, RapidFireResponse, ScenarioOption, SkillsChallenge,
    WorkScenario,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    Scenario,
    WrittenResponse,
    Ranking,
    Simulation,
}

/// Catalog entry describing how a question is answered and scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSpec {
    pub id: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<ScenarioOption>,
    #[serde(default)]
    pub departments: Vec<Department>,
}

/// Answer as captured by the assessment UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswer {
    pub question_id: String,
    /// Trait tag set by the UI. Rapid-fire picks carry one and have no
    /// catalog question.
    #[serde(default)]
    pub dimension: Option<String>,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub response_time_ms: u64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionSignal {
    Choice(usize),
    Text(String),
    Ranking(BTreeMap<String, u32>),
    Allocation(BTreeMap<String, f64>),
    Unanswered,
}

pub fn normalize(spec: &QuestionSpec, answer: &RawAnswer) -> QuestionSignal {
    let payload = unwrap_envelope(&answer.payload);
    match spec.kind {
        QuestionKind::MultipleChoice | QuestionKind::Scenario => choice_signal(spec, payload),
        QuestionKind::WrittenResponse => text_signal(payload),
        QuestionKind::Ranking => ranking_signal(payload),
        QuestionKind::Simulation => allocation_signal(payload),
    }
}

/// Builds scoring input from catalog questions and their recorded answers.
/// Dimension-tagged A/B answers outside the catalog become rapid-fire picks;
/// any other answer referencing an unknown question is skipped.
pub fn assemble(catalog: &[QuestionSpec], answers: &[RawAnswer]) -> AssessmentData {
    let mut data = AssessmentData::default();

    for answer in answers {
        let Some(spec) = catalog
            .iter()
            .find(|question| question.id == answer.question_id)
        else {
            if let Some(pick) = rapid_fire_pick(answer) {
                data.rapid_fire.push(pick);
            }
            continue;
        };

        match (spec.kind, normalize(spec, answer)) {
            (_, QuestionSignal::Choice(index)) => {
                if let Some(option) = spec.options.get(index) {
                    data.work_scenarios.push(scenario_from(spec, &option.id));
                }
            }
            (_, QuestionSignal::Ranking(ranks)) => {
                let top = ranks
                    .iter()
                    .filter(|(id, _)| spec.options.iter().any(|option| &option.id == *id))
                    .min_by_key(|(_, rank)| **rank)
                    .map(|(id, _)| id.clone());
                if let Some(id) = top {
                    data.work_scenarios.push(scenario_from(spec, &id));
                }
            }
            (_, QuestionSignal::Allocation(allocation)) => {
                data.skills_challenges.push(SkillsChallenge::ProblemSolving {
                    allocation: Some(allocation),
                    departments: spec.departments.clone(),
                    total_allocated: None,
                });
            }
            (_, QuestionSignal::Text(response)) => {
                data.skills_challenges.push(SkillsChallenge::Communication {
                    response: Some(response),
                });
            }
            (QuestionKind::Simulation, QuestionSignal::Unanswered) => {
                data.skills_challenges.push(SkillsChallenge::ProblemSolving {
                    allocation: None,
                    departments: spec.departments.clone(),
                    total_allocated: None,
                });
            }
            (QuestionKind::WrittenResponse, QuestionSignal::Unanswered) => {
                data.skills_challenges
                    .push(SkillsChallenge::Communication { response: None });
            }
            (_, QuestionSignal::Unanswered) => {}
        }
    }

    data
}

/// Span between the earliest and latest answer timestamps.
///
/// `None` unless at least two answers carry a timestamp.
pub fn timestamp_span_ms(answers: &[RawAnswer]) -> Option<u64> {
    let mut stamps = answers.iter().filter_map(|answer| answer.timestamp);
    let first = stamps.next()?;
    let (earliest, latest, count) = stamps.fold((first, first, 1usize), |(lo, hi, n), stamp| {
        (lo.min(stamp), hi.max(stamp), n + 1)
    });
    if count < 2 {
        return None;
    }
    u64::try_from((latest - earliest).num_milliseconds()).ok()
}

/// Sum of per-answer response times, for callers without a wall-clock span.
pub fn total_response_time_ms(answers: &[RawAnswer]) -> u64 {
    answers
        .iter()
        .fold(0u64, |total, answer| total.saturating_add(answer.response_time_ms))
}

fn rapid_fire_pick(answer: &RawAnswer) -> Option<RapidFireResponse> {
    let dimension = answer.dimension.as_deref()?.trim();
    if dimension.is_empty() {
        return None;
    }
    let choice = match unwrap_envelope(&answer.payload).as_str()?.trim() {
        "A" | "a" => ForcedChoice::A,
        "B" | "b" => ForcedChoice::B,
        _ => return None,
    };
    Some(RapidFireResponse {
        dimension: dimension.to_string(),
        choice,
    })
}

fn scenario_from(spec: &QuestionSpec, option_id: &str) -> WorkScenario {
    WorkScenario {
        scenario_id: Some(spec.id.clone()),
        user_choice: Some(option_id.to_string()),
        options: spec.options.clone(),
    }
}

fn unwrap_envelope(payload: &Value) -> &Value {
    if let Value::Object(map) = payload {
        for key in ["selected", "choice", "answer", "value"] {
            if let Some(inner) = map.get(key) {
                return inner;
            }
        }
    }
    payload
}

fn choice_signal(spec: &QuestionSpec, payload: &Value) -> QuestionSignal {
    let index = match payload {
        Value::Number(number) => number.as_u64().map(|value| value as usize),
        Value::String(raw) => {
            let raw = raw.trim();
            spec.options
                .iter()
                .position(|option| option.id == raw)
                .or_else(|| raw.parse::<usize>().ok())
        }
        _ => None,
    };

    match index {
        Some(index) if index < spec.options.len() => QuestionSignal::Choice(index),
        _ => QuestionSignal::Unanswered,
    }
}

fn text_signal(payload: &Value) -> QuestionSignal {
    let text = match payload {
        Value::String(raw) => Some(raw.as_str()),
        Value::Object(map) => map.get("text").and_then(Value::as_str),
        _ => None,
    };

    match text.map(str::trim) {
        Some(text) if !text.is_empty() => QuestionSignal::Text(text.to_string()),
        _ => QuestionSignal::Unanswered,
    }
}

fn ranking_signal(payload: &Value) -> QuestionSignal {
    let mut ranks = BTreeMap::new();

    match payload {
        Value::Array(items) => {
            for (position, item) in items.iter().enumerate() {
                if let Some(id) = item.as_str() {
                    ranks.entry(id.to_string()).or_insert(position as u32 + 1);
                }
            }
        }
        Value::Object(map) => {
            for (id, rank) in map {
                if let Some(rank) = parse_number(rank) {
                    if rank >= 0.0 {
                        ranks.insert(id.clone(), rank.round() as u32);
                    }
                }
            }
        }
        _ => {}
    }

    if ranks.is_empty() {
        QuestionSignal::Unanswered
    } else {
        QuestionSignal::Ranking(ranks)
    }
}

fn allocation_signal(payload: &Value) -> QuestionSignal {
    let payload = match payload {
        Value::Object(map) => map.get("allocation").unwrap_or(payload),
        _ => payload,
    };

    let mut allocation = BTreeMap::new();
    if let Value::Object(map) = payload {
        for (name, amount) in map {
            if let Some(amount) = parse_number(amount) {
                allocation.insert(name.clone(), amount);
            }
        }
    }

    if allocation.is_empty() {
        QuestionSignal::Unanswered
    } else {
        QuestionSignal::Allocation(allocation)
    }
}

/// Accepts JSON numbers and numeric strings such as `"$12,500"`.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => {
            let cleaned: String = raw
                .trim()
                .chars()
                .filter(|ch| !matches!(ch, '$' | ',' | '_'))
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|number| number.is_finite())
}
