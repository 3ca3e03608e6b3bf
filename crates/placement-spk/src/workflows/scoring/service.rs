use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::criteria::{CriteriaForm, CriteriaSet, WeightSummary};
use super::domain::{JobPosting, PostingId};
use super::evaluation::{NormalizedWeights, ScoreResult, ScoringConfig, ScoringEngine, ScoringError};
use super::repository::{CandidateRepository, PostingRepository, RepositoryError};

/// Result of a calculate request, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub posting_id: PostingId,
    pub computed_at: DateTime<Utc>,
    pub summary: WeightSummary,
    pub weights: NormalizedWeights,
    pub results: Vec<ScoreResult>,
}

/// Service composing the repositories and the scoring engine.
pub struct ScoringService<P, C> {
    postings: Arc<P>,
    candidates: Arc<C>,
    engine: Arc<ScoringEngine>,
}

impl<P, C> ScoringService<P, C>
where
    P: PostingRepository + 'static,
    C: CandidateRepository + 'static,
{
    pub fn new(postings: Arc<P>, candidates: Arc<C>, config: ScoringConfig) -> Self {
        Self {
            postings,
            candidates,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        self.engine.config()
    }

    /// Rank every candidate that applied to `posting_id` using the submitted weights.
    pub fn calculate(
        &self,
        posting_id: &PostingId,
        form: CriteriaForm,
    ) -> Result<RankingReport, ScoringServiceError> {
        let criteria = self.criteria_for(posting_id, form)?;
        let candidates = self.candidates.candidates_for(posting_id)?;
        let summary = WeightSummary::from_criteria(&criteria, self.engine.config());

        let ranking = self.engine.rank(&criteria, &candidates).map_err(|err| {
            warn!(%posting_id, error = %err, "scoring rejected");
            err
        })?;

        info!(
            %posting_id,
            criteria = criteria.active_count(),
            candidates = ranking.results.len(),
            total_weight = summary.total_weight,
            "ranking calculated"
        );

        Ok(RankingReport {
            posting_id: posting_id.clone(),
            computed_at: Utc::now(),
            summary,
            weights: ranking.weights,
            results: ranking.results,
        })
    }

    /// Running totals for the submitted weights without scoring anyone.
    pub fn preview(
        &self,
        posting_id: &PostingId,
        form: CriteriaForm,
    ) -> Result<WeightSummary, ScoringServiceError> {
        let criteria = self.criteria_for(posting_id, form)?;
        Ok(WeightSummary::from_criteria(
            &criteria,
            self.engine.config(),
        ))
    }

    pub fn posting(&self, posting_id: &PostingId) -> Result<JobPosting, ScoringServiceError> {
        self.postings
            .fetch(posting_id)?
            .ok_or_else(|| ScoringServiceError::PostingNotFound(posting_id.clone()))
    }

    fn criteria_for(
        &self,
        posting_id: &PostingId,
        form: CriteriaForm,
    ) -> Result<CriteriaSet, ScoringServiceError> {
        let posting = self.posting(posting_id)?;
        Ok(form.into_criteria_set(&posting)?)
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("posting {0} not found")]
    PostingNotFound(PostingId),
}
