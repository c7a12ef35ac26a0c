use super::super::domain::{ForcedChoice, RapidFireResponse};
use super::NEUTRAL_SCORE;

/// A/B tallies for one rapid-fire dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceTally {
    pub dimension: String,
    pub a: usize,
    pub b: usize,
}

impl ChoiceTally {
    pub fn total(&self) -> usize {
        self.a + self.b
    }

    /// Share of the majority answer.
    pub fn consistency(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.5;
        }
        self.a.max(self.b) as f64 / total as f64
    }

    /// Majority pick, `None` on an exact tie.
    pub fn majority(&self) -> Option<ForcedChoice> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(ForcedChoice::A),
            std::cmp::Ordering::Less => Some(ForcedChoice::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Tallies per dimension, in first-seen order.
pub fn tally(responses: &[RapidFireResponse]) -> Vec<ChoiceTally> {
    let mut tallies: Vec<ChoiceTally> = Vec::new();

    for response in responses {
        let key = response.dimension.trim().to_ascii_lowercase();
        let index = match tallies.iter().position(|entry| entry.dimension == key) {
            Some(index) => index,
            None => {
                tallies.push(ChoiceTally {
                    dimension: key,
                    a: 0,
                    b: 0,
                });
                tallies.len() - 1
            }
        };

        match response.choice {
            ForcedChoice::A => tallies[index].a += 1,
            ForcedChoice::B => tallies[index].b += 1,
        }
    }

    tallies
}

/// Mean of `max(countA, countB) / total` across dimensions, as a percentage.
pub fn rapid_fire_consistency(responses: &[RapidFireResponse]) -> f64 {
    let tallies = tally(responses);
    if tallies.is_empty() {
        return NEUTRAL_SCORE;
    }

    let sum: f64 = tallies.iter().map(ChoiceTally::consistency).sum();
    sum / tallies.len() as f64 * 100.0
}

/// True when every pick in a non-empty sequence is the same letter.
pub fn is_straight_lined(responses: &[RapidFireResponse]) -> bool {
    match responses.split_first() {
        Some((first, rest)) => rest.iter().all(|response| response.choice == first.choice),
        None => false,
    }
}
