use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{JobPosting, PostingId, SkillId};
use super::evaluation::{normalizer, CriteriaIssue, ScoringConfig, ScoringError};

/// Largest raw weight a posting owner may assign to one criterion.
pub const MAX_RAW_WEIGHT: u32 = 100;

/// One enabled scoring dimension with its raw weight in percentage points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criterion {
    Skill {
        skill_id: SkillId,
        target_level: u8,
        weight: u32,
    },
    Academic {
        weight: u32,
    },
    Organization {
        weight: u32,
    },
    Competition {
        weight: u32,
    },
    DisciplinaryScore {
        weight: u32,
    },
    MisconductCase {
        weight: u32,
    },
}

impl Criterion {
    pub fn weight(&self) -> u32 {
        match self {
            Criterion::Skill { weight, .. }
            | Criterion::Academic { weight }
            | Criterion::Organization { weight }
            | Criterion::Competition { weight }
            | Criterion::DisciplinaryScore { weight }
            | Criterion::MisconductCase { weight } => *weight,
        }
    }

    pub fn key(&self) -> CriterionKey {
        match self {
            Criterion::Skill { skill_id, .. } => CriterionKey::Skill {
                skill_id: skill_id.clone(),
            },
            Criterion::Academic { .. } => CriterionKey::Academic,
            Criterion::Organization { .. } => CriterionKey::Organization,
            Criterion::Competition { .. } => CriterionKey::Competition,
            Criterion::DisciplinaryScore { .. } => CriterionKey::DisciplinaryScore,
            Criterion::MisconductCase { .. } => CriterionKey::MisconductCase,
        }
    }
}

/// Identity of a criterion, independent of its weight.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CriterionKey {
    Skill { skill_id: SkillId },
    Academic,
    Organization,
    Competition,
    DisciplinaryScore,
    MisconductCase,
}

impl fmt::Display for CriterionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionKey::Skill { skill_id } => write!(f, "skill:{skill_id}"),
            CriterionKey::Academic => f.write_str("academic"),
            CriterionKey::Organization => f.write_str("organization"),
            CriterionKey::Competition => f.write_str("competition"),
            CriterionKey::DisciplinaryScore => f.write_str("disciplinary_score"),
            CriterionKey::MisconductCase => f.write_str("misconduct_case"),
        }
    }
}

/// The enabled criteria for one job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaSet {
    pub posting_id: PostingId,
    pub criteria: Vec<Criterion>,
}

impl CriteriaSet {
    pub fn new(posting_id: PostingId, criteria: Vec<Criterion>) -> Self {
        Self {
            posting_id,
            criteria,
        }
    }

    pub fn active_count(&self) -> usize {
        self.criteria.len()
    }

    pub fn total_weight(&self) -> u64 {
        self.criteria
            .iter()
            .map(|criterion| u64::from(criterion.weight()))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }
}

/// Toggle plus weight for an optional criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalWeight {
    pub enabled: bool,
    #[serde(default)]
    pub weight: u32,
}

impl OptionalWeight {
    pub const fn enabled(weight: u32) -> Self {
        Self {
            enabled: true,
            weight,
        }
    }

    pub const fn disabled(weight: u32) -> Self {
        Self {
            enabled: false,
            weight,
        }
    }
}

/// Weight map submitted by the posting owner.
///
/// Every skill required by the posting is an active criterion; skills missing from
/// `skill_weights` take weight 0. Optional criteria default to the values the company
/// form pre-fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaForm {
    pub skill_weights: BTreeMap<SkillId, u32>,
    pub academic: OptionalWeight,
    pub organization: OptionalWeight,
    pub competition: OptionalWeight,
    pub disciplinary_score: OptionalWeight,
    pub misconduct_case: OptionalWeight,
}

impl Default for CriteriaForm {
    fn default() -> Self {
        Self {
            skill_weights: BTreeMap::new(),
            academic: OptionalWeight::enabled(20),
            organization: OptionalWeight::disabled(10),
            competition: OptionalWeight::disabled(10),
            disciplinary_score: OptionalWeight::disabled(15),
            misconduct_case: OptionalWeight::enabled(15),
        }
    }
}

impl CriteriaForm {
    pub fn with_skill_weight(mut self, skill_id: impl Into<String>, weight: u32) -> Self {
        self.skill_weights.insert(SkillId(skill_id.into()), weight);
        self
    }

    /// Build the typed criteria for `posting`, rejecting weights for skills it does not require.
    pub fn into_criteria_set(self, posting: &JobPosting) -> Result<CriteriaSet, ScoringError> {
        if let Some(unknown) = self
            .skill_weights
            .keys()
            .find(|skill_id| posting.requirement(skill_id).is_none())
        {
            return Err(ScoringError::InvalidCriteria(CriteriaIssue::UnknownSkill(
                unknown.clone(),
            )));
        }

        let mut criteria: Vec<Criterion> = posting
            .required_skills
            .iter()
            .map(|requirement| Criterion::Skill {
                skill_id: requirement.skill_id.clone(),
                target_level: requirement.target_level,
                weight: self
                    .skill_weights
                    .get(&requirement.skill_id)
                    .copied()
                    .unwrap_or(0),
            })
            .collect();

        let optional: [(OptionalWeight, fn(u32) -> Criterion); 5] = [
            (self.academic, |weight| Criterion::Academic { weight }),
            (self.organization, |weight| Criterion::Organization { weight }),
            (self.competition, |weight| Criterion::Competition { weight }),
            (self.disciplinary_score, |weight| Criterion::DisciplinaryScore {
                weight,
            }),
            (self.misconduct_case, |weight| Criterion::MisconductCase { weight }),
        ];
        criteria.extend(
            optional
                .into_iter()
                .filter(|(toggle, _)| toggle.enabled)
                .map(|(toggle, build)| build(toggle.weight)),
        );

        Ok(CriteriaSet::new(posting.posting_id.clone(), criteria))
    }
}

/// How the raw weights relate to the ideal total of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightBalance {
    Empty,
    Under,
    Exact,
    Over,
}

/// Running totals shown while the posting owner edits weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightSummary {
    pub active_criteria: usize,
    pub required_criteria: usize,
    pub meets_minimum: bool,
    pub total_weight: u64,
    pub balance: WeightBalance,
    pub message: String,
    /// First validation failure that would block scoring, if any.
    pub blocking_issue: Option<String>,
}

impl WeightSummary {
    pub fn from_criteria(criteria: &CriteriaSet, config: &ScoringConfig) -> Self {
        let active_criteria = criteria.active_count();
        let total_weight = criteria.total_weight();

        let (balance, message) = match total_weight {
            0 => (
                WeightBalance::Empty,
                "no weight assigned yet; at least one criterion needs a positive weight"
                    .to_string(),
            ),
            total if total < u64::from(MAX_RAW_WEIGHT) => (
                WeightBalance::Under,
                format!("total weight is {total}%, ideally 100%; weights will be normalized"),
            ),
            total if total == u64::from(MAX_RAW_WEIGHT) => (
                WeightBalance::Exact,
                "total weight is exactly 100%".to_string(),
            ),
            total => (
                WeightBalance::Over,
                format!("total weight {total}% exceeds 100%; weights will be normalized"),
            ),
        };

        Self {
            active_criteria,
            required_criteria: config.minimum_criteria,
            meets_minimum: active_criteria >= config.minimum_criteria,
            total_weight,
            balance,
            message,
            blocking_issue: normalizer::validate(criteria, config)
                .err()
                .map(|err| err.to_string()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.blocking_issue.is_none()
    }
}
