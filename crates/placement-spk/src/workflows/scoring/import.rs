//! CSV import of candidate applications.
//!
//! Expected header:
//! `posting_id,candidate_id,name,gpa,organization,competition,disciplinary_score,misconduct,skills`
//! where `skills` holds `skill:level` pairs separated by `;`. Empty numeric cells mean the value
//! was never recorded.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{
    ActivityLevel, CandidateApplication, CandidateId, CandidateProfile, PostingId, SkillId,
};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: usize, detail: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read candidate export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid candidate CSV data: {}", err),
            ImportError::Row { line, detail } => {
                write!(f, "candidate CSV row {}: {}", line, detail)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    posting_id: String,
    candidate_id: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gpa: Option<String>,
    #[serde(default)]
    organization: String,
    #[serde(default)]
    competition: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    disciplinary_score: Option<String>,
    #[serde(default)]
    misconduct: String,
    #[serde(default)]
    skills: String,
}

impl CandidateRow {
    fn into_application(self) -> Result<CandidateApplication, String> {
        if self.candidate_id.is_empty() {
            return Err("candidate_id is empty".to_string());
        }
        if self.posting_id.is_empty() {
            return Err("posting_id is empty".to_string());
        }

        let gpa = self
            .gpa
            .map(|raw| {
                raw.parse::<f64>()
                    .map_err(|_| format!("gpa '{raw}' is not a number"))
            })
            .transpose()?;
        let disciplinary_score = self
            .disciplinary_score
            .map(|raw| {
                raw.parse::<u32>()
                    .map_err(|_| format!("disciplinary_score '{raw}' is not a whole number"))
            })
            .transpose()?;
        let organization = self
            .organization
            .parse::<ActivityLevel>()
            .map_err(|err| format!("organization: {err}"))?;
        let competition = self
            .competition
            .parse::<ActivityLevel>()
            .map_err(|err| format!("competition: {err}"))?;
        let misconduct_case = parse_misconduct(&self.misconduct)?;
        let skills = parse_skills(&self.skills)?;

        Ok(CandidateApplication {
            posting_id: PostingId(self.posting_id),
            profile: CandidateProfile {
                candidate_id: CandidateId(self.candidate_id),
                name: self.name,
                skills,
                gpa,
                organization,
                competition,
                disciplinary_score,
                misconduct_case,
            },
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_misconduct(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "0" | "tidak_ada" => Ok(false),
        "true" | "yes" | "1" | "ada" => Ok(true),
        _ => Err(format!("unknown misconduct flag '{raw}'")),
    }
}

fn parse_skills(raw: &str) -> Result<BTreeMap<SkillId, u8>, String> {
    let mut skills = BTreeMap::new();
    for pair in raw.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
        let (skill, level) = pair
            .split_once(':')
            .ok_or_else(|| format!("skill entry '{pair}' must look like skill:level"))?;
        let level = level
            .trim()
            .parse::<u8>()
            .map_err(|_| format!("skill level '{}' is not a whole number", level.trim()))?;
        skills.insert(SkillId(skill.trim().to_string()), level);
    }
    Ok(skills)
}

pub struct CandidateCsvImporter;

impl CandidateCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CandidateApplication>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CandidateApplication>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut applications = Vec::new();
        for (index, row) in csv_reader.deserialize::<CandidateRow>().enumerate() {
            let line = index + 1;
            let application = row?
                .into_application()
                .map_err(|detail| ImportError::Row { line, detail })?;
            applications.push(application);
        }

        Ok(applications)
    }
}
