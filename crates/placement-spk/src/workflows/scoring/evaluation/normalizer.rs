use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::criteria::{CriteriaSet, Criterion, CriterionKey, MAX_RAW_WEIGHT};
use super::config::ScoringConfig;
use super::error::{CriteriaIssue, ScoringError};

/// Share of the total weight held by one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeight {
    pub criterion: CriterionKey,
    pub raw_weight: u32,
    pub weight: f64,
}

/// Normalized weights in criteria order; the `weight` values sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeights {
    pub total_raw_weight: u64,
    pub entries: Vec<NormalizedWeight>,
}

impl NormalizedWeights {
    pub fn get(&self, criterion: &CriterionKey) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| &entry.criterion == criterion)
            .map(|entry| entry.weight)
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }
}

/// Checks everything that must hold before weights can be normalized and returns the raw total.
///
/// The criteria count is checked first so an undersized set never reports weight issues.
pub(crate) fn validate(criteria: &CriteriaSet, config: &ScoringConfig) -> Result<u64, ScoringError> {
    let found = criteria.active_count();
    if found < config.minimum_criteria {
        return Err(ScoringError::InsufficientCriteria {
            required: config.minimum_criteria,
            found,
        });
    }

    let mut seen_skills = BTreeSet::new();
    for criterion in criteria.iter() {
        let weight = criterion.weight();
        if weight > MAX_RAW_WEIGHT {
            return Err(ScoringError::InvalidCriteria(
                CriteriaIssue::WeightOutOfRange {
                    criterion: criterion.key(),
                    weight,
                },
            ));
        }

        if let Criterion::Skill {
            skill_id,
            target_level,
            ..
        } = criterion
        {
            if *target_level == 0 || *target_level > config.max_competency_level {
                return Err(ScoringError::InvalidCriteria(
                    CriteriaIssue::InvalidTargetLevel {
                        skill_id: skill_id.clone(),
                        level: *target_level,
                        max: config.max_competency_level,
                    },
                ));
            }
            if !seen_skills.insert(skill_id) {
                return Err(ScoringError::InvalidCriteria(CriteriaIssue::DuplicateSkill(
                    skill_id.clone(),
                )));
            }
        }
    }

    let total = criteria.total_weight();
    if total == 0 {
        return Err(ScoringError::InvalidCriteria(CriteriaIssue::ZeroTotalWeight));
    }

    Ok(total)
}

/// Divides every raw weight by the sum of all raw weights.
pub fn normalize(
    criteria: &CriteriaSet,
    config: &ScoringConfig,
) -> Result<NormalizedWeights, ScoringError> {
    let total = validate(criteria, config)?;
    let divisor = total as f64;

    let entries = criteria
        .iter()
        .map(|criterion| NormalizedWeight {
            criterion: criterion.key(),
            raw_weight: criterion.weight(),
            weight: f64::from(criterion.weight()) / divisor,
        })
        .collect();

    Ok(NormalizedWeights {
        total_raw_weight: total,
        entries,
    })
}
