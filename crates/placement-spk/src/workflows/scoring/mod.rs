//! Weighted multi-criteria ranking of internship candidates.
//!
//! A posting owner enables criteria and assigns raw weights through a [`CriteriaForm`]. The form
//! is turned into a typed [`CriteriaSet`] once, the [`ScoringEngine`] normalizes the weights,
//! scores each candidate per criterion on a `[0, 1]` scale and orders the weighted sums.

pub mod criteria;
pub mod domain;
pub(crate) mod evaluation;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use criteria::{
    CriteriaForm, CriteriaSet, Criterion, CriterionKey, OptionalWeight, WeightBalance,
    WeightSummary, MAX_RAW_WEIGHT,
};
pub use domain::{
    ActivityLevel, CandidateApplication, CandidateId, CandidateProfile, JobPosting, PostingId,
    SkillId, SkillRequirement, UnknownActivityLevel,
};
pub use evaluation::{
    compute_ranking, normalize, CriteriaIssue, CriterionContribution, NormalizedWeight,
    NormalizedWeights, Ranking, ScoreResult, ScoringConfig, ScoringEngine, ScoringError,
};
pub use import::{CandidateCsvImporter, ImportError};
pub use repository::{CandidateRepository, PostingRepository, RepositoryError};
pub use router::scoring_router;
pub use service::{RankingReport, ScoringService, ScoringServiceError};
