use serde::{Deserialize, Serialize};

/// Tunables of the scoring rubric shared by every posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub minimum_criteria: usize,
    pub gpa_scale: f64,
    pub disciplinary_ceiling: u32,
    pub max_competency_level: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            minimum_criteria: 5,
            gpa_scale: 4.0,
            disciplinary_ceiling: 1000,
            max_competency_level: 5,
        }
    }
}
