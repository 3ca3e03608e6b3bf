use super::common::*;
use crate::workflows::scoring::criteria::CriterionKey;
use crate::workflows::scoring::domain::{ActivityLevel, CandidateId, CandidateProfile};
use crate::workflows::scoring::evaluation::{compute_ranking, ScoringError};

#[test]
fn reference_candidate_scores_weighted_sum_of_contributions() {
    let results = compute_ranking(
        &reference_criteria(),
        &[reference_candidate("mhs-01")],
        &scoring_config(),
    )
    .expect("ranking succeeds");

    let result = &results[0];
    assert_eq!(result.rank, 1);
    // 0.30*1.0 + 0.30*0.5 + 0.20*0.8 + 0.10*0.5 + 0.10*1.0
    assert_close(result.score, 0.76);
    assert_close(
        result
            .contribution(&CriterionKey::Skill {
                skill_id: skill("sql"),
            })
            .expect("sql contribution"),
        0.5,
    );
    assert_close(
        result
            .contribution(&CriterionKey::Academic)
            .expect("academic contribution"),
        0.8,
    );
    let weighted: f64 = result.breakdown.iter().map(|entry| entry.weighted).sum();
    assert_close(weighted, result.score);
}

#[test]
fn exceeding_the_target_level_caps_at_full_credit() {
    let mut profile = reference_candidate("mhs-01");
    profile.skills.insert(skill("rust"), 5);

    let results = engine()
        .rank(&reference_criteria(), &[profile])
        .expect("ranking succeeds")
        .results;

    assert_close(
        results[0]
            .contribution(&CriterionKey::Skill {
                skill_id: skill("rust"),
            })
            .expect("rust contribution"),
        1.0,
    );
}

#[test]
fn cost_criteria_penalise_higher_values() {
    let mut clean = strong_candidate("mhs-01");
    clean.disciplinary_score = Some(250);
    let mut flagged = strong_candidate("mhs-02");
    flagged.disciplinary_score = Some(4000);
    flagged.misconduct_case = true;

    let results = engine()
        .rank(&full_criteria(), &[flagged, clean])
        .expect("ranking succeeds")
        .results;

    let clean = &results[0];
    let flagged = &results[1];
    assert_eq!(clean.candidate_id, CandidateId("mhs-01".to_string()));
    assert_close(
        clean
            .contribution(&CriterionKey::DisciplinaryScore)
            .expect("disciplinary"),
        0.75,
    );
    assert_close(
        flagged
            .contribution(&CriterionKey::DisciplinaryScore)
            .expect("disciplinary"),
        0.0,
    );
    assert_close(
        flagged
            .contribution(&CriterionKey::MisconductCase)
            .expect("misconduct"),
        0.0,
    );
    assert_close(
        clean
            .contribution(&CriterionKey::MisconductCase)
            .expect("misconduct"),
        1.0,
    );
}

#[test]
fn activity_levels_map_to_fixed_credit() {
    let mut none = CandidateProfile::new("a");
    none.competition = ActivityLevel::None;
    let mut active = CandidateProfile::new("b");
    active.competition = ActivityLevel::Active;
    let mut very = CandidateProfile::new("c");
    very.competition = ActivityLevel::VeryActive;

    let results = engine()
        .rank(&full_criteria(), &[none, active, very])
        .expect("ranking succeeds")
        .results;

    let credit = |id: &str| {
        results
            .iter()
            .find(|result| result.candidate_id.0 == id)
            .and_then(|result| result.contribution(&CriterionKey::Competition))
            .expect("competition contribution")
    };
    assert_close(credit("a"), 0.0);
    assert_close(credit("b"), 0.5);
    assert_close(credit("c"), 1.0);
}

#[test]
fn contributions_and_scores_stay_within_unit_interval() {
    let mut empty = CandidateProfile::new("mhs-empty");
    empty.misconduct_case = true;
    let mut overachiever = strong_candidate("mhs-top");
    overachiever.gpa = Some(4.0);
    overachiever.skills.insert(skill("rust"), 5);
    overachiever.skills.insert(skill("sql"), 5);

    let candidates = vec![
        empty,
        overachiever,
        reference_candidate("mhs-ref"),
        strong_candidate("mhs-strong"),
    ];

    let results = engine()
        .rank(&full_criteria(), &candidates)
        .expect("ranking succeeds")
        .results;

    assert_eq!(results.len(), candidates.len());
    for result in &results {
        assert!((0.0..=1.0).contains(&result.score), "{result:?}");
        for entry in &result.breakdown {
            assert!((0.0..=1.0).contains(&entry.contribution), "{entry:?}");
        }
    }
}

#[test]
fn candidate_without_data_is_ranked_last_not_excluded() {
    let results = engine()
        .rank(
            &full_criteria(),
            &[CandidateProfile::new("mhs-blank"), reference_candidate("mhs-ref")],
        )
        .expect("ranking succeeds")
        .results;

    assert_eq!(results.len(), 2);
    let blank = &results[1];
    assert_eq!(blank.candidate_id, CandidateId("mhs-blank".to_string()));
    assert_eq!(blank.rank, 2);
    // Only the misconduct criterion credits an empty profile.
    let misconduct_weight = 10.0 / 130.0;
    assert_close(blank.score, misconduct_weight);
}

#[test]
fn ranking_is_descending_and_idempotent() {
    let candidates = vec![
        reference_candidate("mhs-03"),
        CandidateProfile::new("mhs-02"),
        strong_candidate("mhs-01"),
    ];

    let first = compute_ranking(&full_criteria(), &candidates, &scoring_config())
        .expect("ranking succeeds");
    let second = compute_ranking(&full_criteria(), &candidates, &scoring_config())
        .expect("ranking succeeds");

    assert_eq!(first, second);
    assert!(first
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
    let ranks: Vec<usize> = first.iter().map(|result| result.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn exact_ties_are_ordered_by_candidate_id() {
    let candidates = vec![
        reference_candidate("mhs-30"),
        reference_candidate("mhs-10"),
        reference_candidate("mhs-20"),
    ];

    let results = compute_ranking(&reference_criteria(), &candidates, &scoring_config())
        .expect("ranking succeeds");

    let order: Vec<&str> = results
        .iter()
        .map(|result| result.candidate_id.0.as_str())
        .collect();
    assert_eq!(order, vec!["mhs-10", "mhs-20", "mhs-30"]);
    assert_eq!(results[0].score, results[2].score);
}

#[test]
fn raising_a_skill_level_never_lowers_the_score() {
    let criteria = full_criteria();
    let mut previous = None;

    for level in 1..=5u8 {
        let mut profile = reference_candidate("mhs-01");
        profile.skills.insert(skill("sql"), level);
        let score = engine()
            .rank(&criteria, &[profile])
            .expect("ranking succeeds")
            .results[0]
            .score;

        if let Some(previous) = previous {
            assert!(score >= previous, "level {level}: {score} < {previous}");
        }
        previous = Some(score);
    }
}

#[test]
fn inputs_are_left_untouched() {
    let criteria = full_criteria();
    let candidates = vec![reference_candidate("mhs-01"), strong_candidate("mhs-02")];
    let criteria_before = criteria.clone();
    let candidates_before = candidates.clone();

    engine()
        .rank(&criteria, &candidates)
        .expect("ranking succeeds");

    assert_eq!(criteria, criteria_before);
    assert_eq!(candidates, candidates_before);
}

#[test]
fn gpa_above_scale_is_invalid_profile_data() {
    let mut profile = reference_candidate("mhs-07");
    profile.gpa = Some(4.2);

    match engine().rank(&reference_criteria(), &[reference_candidate("mhs-01"), profile]) {
        Err(error @ ScoringError::InvalidProfileData { .. }) => {
            assert_eq!(error.field(), "candidates.mhs-07.gpa");
        }
        other => panic!("expected invalid profile data, got {other:?}"),
    }
}

#[test]
fn skill_level_outside_scale_is_invalid_profile_data() {
    let mut profile = reference_candidate("mhs-08");
    profile.skills.insert(skill("sql"), 9);

    assert!(matches!(
        engine().rank(&reference_criteria(), &[profile]),
        Err(ScoringError::InvalidProfileData { field, .. }) if field == "skills.sql"
    ));
}

#[test]
fn criteria_errors_win_over_profile_errors() {
    let mut criteria = reference_criteria();
    criteria.criteria.pop();
    let mut profile = reference_candidate("mhs-09");
    profile.gpa = Some(f64::NAN);

    assert!(matches!(
        engine().rank(&criteria, &[profile]),
        Err(ScoringError::InsufficientCriteria { .. })
    ));
}

#[test]
fn empty_candidate_list_yields_empty_ranking() {
    let ranking = engine()
        .rank(&reference_criteria(), &[])
        .expect("ranking succeeds");

    assert!(ranking.results.is_empty());
    assert_eq!(ranking.weights.entries.len(), 5);
}
