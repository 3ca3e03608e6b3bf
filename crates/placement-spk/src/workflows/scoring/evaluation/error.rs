use super::super::criteria::CriterionKey;
use super::super::domain::{CandidateId, SkillId};

/// Validation failures raised before any candidate is aggregated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("at least {required} criteria must be enabled before scoring (found {found})")]
    InsufficientCriteria { required: usize, found: usize },
    #[error("invalid criteria: {0}")]
    InvalidCriteria(CriteriaIssue),
    #[error("invalid {field} for candidate {candidate_id}: {detail}")]
    InvalidProfileData {
        candidate_id: CandidateId,
        field: String,
        detail: String,
    },
}

/// Reasons a criteria set cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaIssue {
    #[error("total weight of the enabled criteria is zero")]
    ZeroTotalWeight,
    #[error("weight {weight} for {criterion} is outside 0..=100")]
    WeightOutOfRange { criterion: CriterionKey, weight: u32 },
    #[error("target level {level} for skill {skill_id} is outside 1..={max}")]
    InvalidTargetLevel { skill_id: SkillId, level: u8, max: u8 },
    #[error("skill {0} is listed more than once")]
    DuplicateSkill(SkillId),
    #[error("skill {0} is not required by the posting")]
    UnknownSkill(SkillId),
}

impl ScoringError {
    /// Input location the caller has to correct.
    pub fn field(&self) -> String {
        match self {
            ScoringError::InsufficientCriteria { .. } => "criteria".to_string(),
            ScoringError::InvalidCriteria(issue) => match issue {
                CriteriaIssue::ZeroTotalWeight => "weights".to_string(),
                CriteriaIssue::WeightOutOfRange { criterion, .. } => criterion.to_string(),
                CriteriaIssue::InvalidTargetLevel { skill_id, .. }
                | CriteriaIssue::DuplicateSkill(skill_id)
                | CriteriaIssue::UnknownSkill(skill_id) => format!("skill:{skill_id}"),
            },
            ScoringError::InvalidProfileData {
                candidate_id,
                field,
                ..
            } => format!("candidates.{candidate_id}.{field}"),
        }
    }

    pub(crate) fn profile(
        candidate_id: &CandidateId,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        ScoringError::InvalidProfileData {
            candidate_id: candidate_id.clone(),
            field: field.into(),
            detail: detail.into(),
        }
    }
}
