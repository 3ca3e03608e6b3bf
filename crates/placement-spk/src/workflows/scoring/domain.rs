use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a skill in the shared skill catalogue.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkillId(pub String);

/// Identifier of an evaluated candidate. Ranking ties are broken on this value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier of the job posting whose criteria drive a scoring run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostingId(pub String);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Self-reported involvement in organisations or competitions.
///
/// Deserialization goes through [`FromStr`], which also accepts the legacy values
/// `tidak_ikut`, `aktif` and `sangat_aktif`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ActivityLevel {
    #[default]
    None,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Fixed credit on the `[0, 1]` scale.
    pub const fn credit(self) -> f64 {
        match self {
            ActivityLevel::None => 0.0,
            ActivityLevel::Active => 0.5,
            ActivityLevel::VeryActive => 1.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActivityLevel::None => "none",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

/// Activity value outside the known vocabulary, kept as written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activity level '{0}'")]
pub struct UnknownActivityLevel(pub String);

impl FromStr for ActivityLevel {
    type Err = UnknownActivityLevel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "tidak_ikut" => Ok(Self::None),
            "active" | "aktif" => Ok(Self::Active),
            "very_active" | "sangat_aktif" => Ok(Self::VeryActive),
            _ => Err(UnknownActivityLevel(raw.to_string())),
        }
    }
}

impl TryFrom<String> for ActivityLevel {
    type Error = UnknownActivityLevel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Snapshot of one evaluee as maintained by students and administrators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub candidate_id: CandidateId,
    #[serde(default)]
    pub name: String,
    /// Competency level per skill on the ordinal scale `1..=max_competency_level`.
    #[serde(default)]
    pub skills: BTreeMap<SkillId, u8>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub organization: ActivityLevel,
    #[serde(default)]
    pub competition: ActivityLevel,
    /// Lower is better.
    #[serde(default)]
    pub disciplinary_score: Option<u32>,
    #[serde(default)]
    pub misconduct_case: bool,
}

impl CandidateProfile {
    pub fn new(candidate_id: impl Into<String>) -> Self {
        Self {
            candidate_id: CandidateId(candidate_id.into()),
            name: String::new(),
            skills: BTreeMap::new(),
            gpa: None,
            organization: ActivityLevel::None,
            competition: ActivityLevel::None,
            disciplinary_score: None,
            misconduct_case: false,
        }
    }

    pub fn skill_level(&self, skill_id: &SkillId) -> Option<u8> {
        self.skills.get(skill_id).copied()
    }
}

/// Skill a posting asks for, with the competency level the company targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill_id: SkillId,
    #[serde(default)]
    pub name: String,
    pub target_level: u8,
}

/// Minimal description of the internship posting used during scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub posting_id: PostingId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub required_skills: Vec<SkillRequirement>,
}

impl JobPosting {
    pub fn requirement(&self, skill_id: &SkillId) -> Option<&SkillRequirement> {
        self.required_skills
            .iter()
            .find(|requirement| &requirement.skill_id == skill_id)
    }
}

/// A candidate profile filed against a specific posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateApplication {
    pub posting_id: PostingId,
    pub profile: CandidateProfile,
}
