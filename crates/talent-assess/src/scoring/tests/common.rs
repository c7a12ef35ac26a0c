use std::collections::BTreeMap;

use crate::scoring::{
    CareerSwipe, Department, ForcedChoice, RapidFireResponse, ScenarioOption, SkillsChallenge,
    SwipeAction, WorkScenario,
};

pub(super) fn swipe(category: &str, action: SwipeAction) -> CareerSwipe {
    CareerSwipe {
        category: category.to_string(),
        action,
    }
}

pub(super) fn pick(dimension: &str, choice: ForcedChoice) -> RapidFireResponse {
    RapidFireResponse {
        dimension: dimension.to_string(),
        choice,
    }
}

pub(super) fn answered_scenario(points: &[(&str, f64)]) -> WorkScenario {
    WorkScenario {
        scenario_id: Some("scenario".to_string()),
        user_choice: Some("chosen".to_string()),
        options: vec![
            ScenarioOption {
                id: "chosen".to_string(),
                scores: points
                    .iter()
                    .map(|(key, value)| ((*key).to_string(), *value))
                    .collect(),
            },
            ScenarioOption {
                id: "other".to_string(),
                scores: BTreeMap::from([("leadership".to_string(), -3.0)]),
            },
        ],
    }
}

pub(super) fn department(name: &str, low: f64, high: f64) -> Department {
    Department {
        name: name.to_string(),
        optimal_range: (low, high),
    }
}

pub(super) fn even_budget() -> SkillsChallenge {
    SkillsChallenge::ProblemSolving {
        allocation: Some(BTreeMap::from([
            ("A".to_string(), 50_000.0),
            ("B".to_string(), 50_000.0),
        ])),
        departments: vec![
            department("A", 40_000.0, 60_000.0),
            department("B", 40_000.0, 60_000.0),
        ],
        total_allocated: Some(100_000.0),
    }
}

pub(super) fn original_ideas(count: usize) -> Vec<String> {
    (0..count)
        .map(|index| format!("sculpt a tiny wire figure number {index}"))
        .collect()
}
