//! Pure per-archetype scorers. Each one returns a score in `0..=100` and falls
//! back to a conservative default instead of failing on missing input.

mod challenges;
mod interest;
mod rapid_fire;
mod scenarios;

pub use challenges::{
    analytical, challenge_scores, communication, creative_thinking, problem_solving,
    score_challenge, skill_readiness,
};
pub use interest::{career_clarity, category_interest, clearest_category};
pub use rapid_fire::{is_straight_lined, rapid_fire_consistency, tally, ChoiceTally};
pub use scenarios::{scenario_dimension, scenario_dimensions};

/// Returned when a payload is absent or unrecognised.
pub const DEFAULT_LOW_SCORE: f64 = 30.0;
/// Returned when a dimension has no data at all.
pub const NEUTRAL_SCORE: f64 = 50.0;
