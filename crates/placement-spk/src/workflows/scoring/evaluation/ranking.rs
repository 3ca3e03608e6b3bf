use super::super::criteria::CriteriaSet;
use super::super::domain::CandidateProfile;
use super::config::ScoringConfig;
use super::normalizer::NormalizedWeights;
use super::rules::{assess, clamp_unit};
use super::{CriterionContribution, ScoreResult};

/// Weighted sum of the per-criterion assessments for one candidate. `rank` is left at 0.
pub(crate) fn aggregate(
    criteria: &CriteriaSet,
    weights: &NormalizedWeights,
    profile: &CandidateProfile,
    config: &ScoringConfig,
) -> ScoreResult {
    let breakdown: Vec<CriterionContribution> = criteria
        .iter()
        .zip(&weights.entries)
        .map(|(criterion, normalized)| {
            let assessment = assess(criterion, profile, config);
            CriterionContribution {
                criterion: normalized.criterion.clone(),
                raw_weight: normalized.raw_weight,
                weight: normalized.weight,
                contribution: assessment.value,
                weighted: normalized.weight * assessment.value,
                notes: assessment.notes,
            }
        })
        .collect();

    let score = clamp_unit(breakdown.iter().map(|entry| entry.weighted).sum());

    ScoreResult {
        rank: 0,
        candidate_id: profile.candidate_id.clone(),
        name: profile.name.clone(),
        score,
        breakdown,
    }
}

/// Orders by score descending, then candidate id ascending, and assigns 1-based ranks.
pub(crate) fn rank(mut results: Vec<ScoreResult>) -> Vec<ScoreResult> {
    results.sort_by(|left, right| {
        right
            .score
            .total_cmp(&left.score)
            .then_with(|| left.candidate_id.cmp(&right.candidate_id))
    });

    for (position, result) in results.iter_mut().enumerate() {
        result.rank = position + 1;
    }

    results
}
