use super::common::*;
use crate::scoring::scorers::{
    analytical, career_clarity, category_interest, challenge_scores, clearest_category,
    communication, creative_thinking, is_straight_lined, problem_solving, rapid_fire_consistency,
    scenario_dimension, scenario_dimensions, score_challenge, skill_readiness, tally,
    DEFAULT_LOW_SCORE, NEUTRAL_SCORE,
};
use crate::scoring::{AssessmentData, Dimension, ForcedChoice, SkillsChallenge, SwipeAction};
use std::collections::BTreeMap;

#[test]
fn even_budget_inside_both_ranges_scores_forty() {
    assert_eq!(score_challenge(&even_budget()), 40.0);
}

#[test]
fn budget_outside_range_decays_and_total_mismatch_costs_points() {
    let allocation = BTreeMap::from([("A".to_string(), 70_000.0), ("B".to_string(), 40_000.0)]);
    let departments = vec![
        department("A", 40_000.0, 60_000.0),
        department("B", 40_000.0, 60_000.0),
    ];

    // A is 10k over: 20 - 10 = 10. B in range: 20. Total 110k: -10.
    assert_eq!(problem_solving(&allocation, &departments, None), 20.0);
}

#[test]
fn budget_never_goes_negative() {
    let allocation = BTreeMap::from([("A".to_string(), 900_000.0)]);
    let departments = vec![department("A", 0.0, 10_000.0)];

    assert_eq!(problem_solving(&allocation, &departments, None), 0.0);
}

#[test]
fn twelve_original_elaborate_ideas_score_full_marks() {
    assert_eq!(creative_thinking(&original_ideas(12)), 100.0);
}

#[test]
fn common_uses_lower_originality() {
    let ideas = vec![
        "use it as a bookmark in a novel".to_string(),
        "a hook".to_string(),
    ];

    // fluency 20, originality 0, elaboration 50
    let score = creative_thinking(&ideas);
    assert!((score - 18.0).abs() < 1e-9, "got {score}");
}

#[test]
fn blank_ideas_score_zero() {
    assert_eq!(creative_thinking(&["   ".to_string()]), 0.0);
}

#[test]
fn empathetic_response_with_follow_up_scores_high() {
    let response = "I understand and I'm sorry. Let me help find a solution together; \
                    I'll send an update with the next step by end of day.";

    let score = communication(response);
    assert!(score >= 80.0, "got {score}");
    assert!(score <= 100.0);
}

#[test]
fn blaming_response_loses_tone_credit() {
    let response = "It's not my problem, the policy says you should have read it. It's your fault.";

    assert_eq!(communication(response), 0.0);
}

#[test]
fn analytical_counts_expected_insights() {
    let insights = vec![
        "Strong seasonal pattern".to_string(),
        "One outlier in March".to_string(),
    ];
    assert_eq!(analytical(&insights), 40.0);
}

#[test]
fn missing_payloads_fall_back_to_low_default() {
    let challenges = vec![
        SkillsChallenge::CreativeThinking { ideas: None },
        SkillsChallenge::Communication { response: None },
        SkillsChallenge::Unknown,
    ];

    for challenge in &challenges {
        assert_eq!(score_challenge(challenge), DEFAULT_LOW_SCORE);
    }
    assert_eq!(skill_readiness(&challenges), DEFAULT_LOW_SCORE);
    assert_eq!(skill_readiness(&[]), DEFAULT_LOW_SCORE);
}

#[test]
fn unknown_challenge_type_deserializes_to_catch_all() {
    let challenge: SkillsChallenge =
        serde_json::from_str(r#"{"type":"memory_game","cards":[1,2,3]}"#).expect("parses");

    assert_eq!(challenge, SkillsChallenge::Unknown);
}

#[test]
fn untyped_challenges_score_low_without_rejecting_the_sitting() {
    let data: AssessmentData = serde_json::from_str(
        r#"{"skillsChallenges":[
            {"ideas":["use it to tie a plant stake upright"]},
            {"type":null,"response":"Happy to help."},
            {"type":7}
        ]}"#,
    )
    .expect("parses");

    assert_eq!(data.skills_challenges.len(), 3);
    for challenge in &data.skills_challenges {
        assert_eq!(challenge, &SkillsChallenge::Unknown);
        assert_eq!(score_challenge(challenge), DEFAULT_LOW_SCORE);
    }
}

#[test]
fn misshapen_challenge_fields_read_as_absent() {
    let challenge: SkillsChallenge =
        serde_json::from_str(r#"{"type":"creative_thinking","ideas":"one long idea"}"#)
            .expect("parses");

    assert_eq!(challenge, SkillsChallenge::CreativeThinking { ideas: None });
}

#[test]
fn challenge_scores_keep_type_labels() {
    let scores = challenge_scores(&[even_budget(), SkillsChallenge::Unknown]);

    assert_eq!(scores[0].challenge_type, "problem_solving");
    assert_eq!(scores[0].score, 40.0);
    assert_eq!(scores[1].challenge_type, "unknown");
}

#[test]
fn skill_readiness_averages_challenges() {
    let challenges = vec![
        even_budget(),
        SkillsChallenge::CreativeThinking {
            ideas: Some(original_ideas(12)),
        },
    ];

    assert_eq!(skill_readiness(&challenges), 70.0);
}

#[test]
fn clarity_reports_most_decisive_category() {
    let swipes = vec![
        swipe("technology", SwipeAction::Like),
        swipe("Technology", SwipeAction::Like),
        swipe("sales", SwipeAction::Like),
        swipe("sales", SwipeAction::Dislike),
    ];

    assert_eq!(career_clarity(&swipes), 100.0);

    let interest = category_interest(&swipes);
    assert_eq!(interest.len(), 2);
    assert_eq!(interest[0].category, "technology");
    assert_eq!(interest[0].total, 2);
    assert_eq!(interest[1].like_ratio, 0.5);
}

#[test]
fn undecided_swipes_have_zero_clarity() {
    let swipes = vec![
        swipe("healthcare", SwipeAction::Like),
        swipe("healthcare", SwipeAction::Dislike),
    ];

    assert_eq!(career_clarity(&swipes), 0.0);
}

#[test]
fn clarity_defaults_low_without_swipes() {
    assert_eq!(career_clarity(&[]), DEFAULT_LOW_SCORE);
    assert!(clearest_category(&[]).is_none());
}

#[test]
fn clearest_category_prefers_first_seen_on_tie() {
    let swipes = vec![
        swipe("education", SwipeAction::Like),
        swipe("finance", SwipeAction::Dislike),
    ];

    let clearest = clearest_category(&swipes).expect("category");
    assert_eq!(clearest.category, "education");
}

#[test]
fn scenario_points_rescale_onto_percentages() {
    let scenarios = vec![
        answered_scenario(&[("leadership", 5.0), ("teamwork", 1.0)]),
        answered_scenario(&[("leadership", 3.0)]),
    ];

    let scores = scenario_dimensions(&scenarios);

    // leadership avg 4 -> 87.5, teamwork avg 1 -> 50
    assert_eq!(scores.get(&Dimension::Leadership), Some(&87.5));
    assert_eq!(scores.get(&Dimension::Teamwork), Some(&50.0));
    assert!(!scores.contains_key(&Dimension::Communication));
}

#[test]
fn scenario_scores_clamp_at_both_ends() {
    let low = scenario_dimensions(&[answered_scenario(&[("adaptability", -9.0)])]);
    let high = scenario_dimensions(&[answered_scenario(&[("adaptability", 9.0)])]);

    assert_eq!(low.get(&Dimension::Adaptability), Some(&0.0));
    assert_eq!(high.get(&Dimension::Adaptability), Some(&100.0));
}

#[test]
fn unanswered_scenarios_read_as_neutral() {
    let mut scenario = answered_scenario(&[("work_ethic", 5.0)]);
    scenario.user_choice = None;

    assert!(scenario_dimensions(&[scenario.clone()]).is_empty());
    assert_eq!(
        scenario_dimension(&[scenario], Dimension::WorkEthic),
        NEUTRAL_SCORE
    );
}

#[test]
fn balanced_rapid_fire_is_fifty_percent_consistent() {
    let responses: Vec<_> = (0..10)
        .map(|index| {
            let choice = if index < 5 {
                ForcedChoice::A
            } else {
                ForcedChoice::B
            };
            pick("pace", choice)
        })
        .collect();

    assert_eq!(rapid_fire_consistency(&responses), 50.0);
    assert!(!is_straight_lined(&responses));

    let tallies = tally(&responses);
    assert_eq!(tallies.len(), 1);
    assert_eq!(tallies[0].majority(), None);
}

#[test]
fn consistency_averages_across_dimensions() {
    let responses = vec![
        pick("pace", ForcedChoice::A),
        pick("pace", ForcedChoice::A),
        pick("Focus", ForcedChoice::A),
        pick("focus", ForcedChoice::B),
    ];

    assert_eq!(rapid_fire_consistency(&responses), 75.0);
    assert_eq!(tally(&responses)[1].dimension, "focus");
}

#[test]
fn empty_rapid_fire_is_neutral_and_not_straight_lined() {
    assert_eq!(rapid_fire_consistency(&[]), NEUTRAL_SCORE);
    assert!(!is_straight_lined(&[]));
    assert!(is_straight_lined(&[pick("pace", ForcedChoice::B)]));
}
