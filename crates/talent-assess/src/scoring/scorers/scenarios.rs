use std::collections::BTreeMap;

use super::super::domain::{Dimension, WorkScenario};
use super::NEUTRAL_SCORE;

/// Lowest raw point value a scenario option can award.
const RAW_FLOOR: f64 = 3.0;
/// Width of the raw scale, from -3 up to +5.
const RAW_SPAN: f64 = 8.0;

/// Averages the chosen options' declared points per dimension and rescales
/// them onto 0..=100 with `(avg + 3) / 8 * 100`.
///
/// Only dimensions touched by at least one answered scenario appear in the
/// map; unknown dimension keys are skipped.
pub fn scenario_dimensions(scenarios: &[WorkScenario]) -> BTreeMap<Dimension, f64> {
    let mut totals: BTreeMap<Dimension, (f64, usize)> = BTreeMap::new();

    for scenario in scenarios {
        let Some(option) = scenario.chosen_option() else {
            continue;
        };

        for (key, points) in &option.scores {
            let Some(dimension) = Dimension::from_key(key) else {
                continue;
            };
            if !points.is_finite() {
                continue;
            }
            let entry = totals.entry(dimension).or_insert((0.0, 0));
            entry.0 += points;
            entry.1 += 1;
        }
    }

    totals
        .into_iter()
        .map(|(dimension, (sum, count))| (dimension, rescale(sum / count as f64)))
        .collect()
}

/// Score for a single dimension, neutral when no scenario touched it.
pub fn scenario_dimension(scenarios: &[WorkScenario], dimension: Dimension) -> f64 {
    scenario_dimensions(scenarios)
        .get(&dimension)
        .copied()
        .unwrap_or(NEUTRAL_SCORE)
}

fn rescale(average: f64) -> f64 {
    ((average + RAW_FLOOR) / RAW_SPAN * 100.0).clamp(0.0, 100.0)
}
