mod config;
mod error;
pub(crate) mod normalizer;
mod ranking;
mod rules;

pub use config::ScoringConfig;
pub use error::{CriteriaIssue, ScoringError};
pub use normalizer::{normalize, NormalizedWeight, NormalizedWeights};

use super::criteria::{CriteriaSet, CriterionKey};
use super::domain::{CandidateId, CandidateProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless evaluator that applies the scoring rubric to a batch of candidates.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn normalize(&self, criteria: &CriteriaSet) -> Result<NormalizedWeights, ScoringError> {
        normalize(criteria, &self.config)
    }

    /// Validates the criteria and every profile, then scores and orders all candidates.
    ///
    /// Nothing is scored when any validation fails.
    pub fn rank(
        &self,
        criteria: &CriteriaSet,
        candidates: &[CandidateProfile],
    ) -> Result<Ranking, ScoringError> {
        let weights = self.normalize(criteria)?;

        for profile in candidates {
            rules::validate_profile(profile, &self.config)?;
        }

        let results = candidates
            .iter()
            .map(|profile| ranking::aggregate(criteria, &weights, profile, &self.config))
            .collect();
        let results = ranking::rank(results);

        debug!(
            posting_id = %criteria.posting_id,
            criteria = criteria.active_count(),
            candidates = candidates.len(),
            "ranked candidates"
        );

        Ok(Ranking { weights, results })
    }
}

/// Ranks `candidates` against `criteria` with the given rubric settings.
pub fn compute_ranking(
    criteria: &CriteriaSet,
    candidates: &[CandidateProfile],
    config: &ScoringConfig,
) -> Result<Vec<ScoreResult>, ScoringError> {
    ScoringEngine::new(config.clone())
        .rank(criteria, candidates)
        .map(|ranking| ranking.results)
}

/// Output of one scoring run: the weights that were applied and the ordered results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub weights: NormalizedWeights,
    pub results: Vec<ScoreResult>,
}

/// Discrete contribution to an aggregate score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionContribution {
    pub criterion: CriterionKey,
    pub raw_weight: u32,
    pub weight: f64,
    pub contribution: f64,
    pub weighted: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub rank: usize,
    pub candidate_id: CandidateId,
    pub name: String,
    pub score: f64,
    pub breakdown: Vec<CriterionContribution>,
}

impl ScoreResult {
    pub fn contribution(&self, criterion: &CriterionKey) -> Option<f64> {
        self.breakdown
            .iter()
            .find(|entry| &entry.criterion == criterion)
            .map(|entry| entry.contribution)
    }
}
