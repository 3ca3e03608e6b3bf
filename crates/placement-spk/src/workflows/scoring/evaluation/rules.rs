use super::super::criteria::Criterion;
use super::super::domain::CandidateProfile;
use super::config::ScoringConfig;
use super::error::ScoringError;

/// Bounded credit a candidate earns on one criterion, with an audit note.
pub(crate) struct Assessment {
    pub value: f64,
    pub notes: String,
}

impl Assessment {
    fn new(value: f64, notes: String) -> Self {
        Self {
            value: clamp_unit(value),
            notes,
        }
    }
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Rejects profile values outside their declared domain.
pub(crate) fn validate_profile(
    profile: &CandidateProfile,
    config: &ScoringConfig,
) -> Result<(), ScoringError> {
    if let Some(gpa) = profile.gpa {
        if !gpa.is_finite() || gpa < 0.0 || gpa > config.gpa_scale {
            return Err(ScoringError::profile(
                &profile.candidate_id,
                "gpa",
                format!("{gpa} is outside 0..={}", config.gpa_scale),
            ));
        }
    }

    for (skill_id, level) in &profile.skills {
        if *level == 0 || *level > config.max_competency_level {
            return Err(ScoringError::profile(
                &profile.candidate_id,
                format!("skills.{skill_id}"),
                format!(
                    "competency level {level} is outside 1..={}",
                    config.max_competency_level
                ),
            ));
        }
    }

    Ok(())
}

pub(crate) fn assess(
    criterion: &Criterion,
    profile: &CandidateProfile,
    config: &ScoringConfig,
) -> Assessment {
    match criterion {
        Criterion::Skill {
            skill_id,
            target_level,
            ..
        } => match profile.skill_level(skill_id) {
            Some(level) => {
                let ratio = f64::from(level) / f64::from(*target_level);
                let notes = if level >= *target_level {
                    format!("level {level} meets target {target_level}")
                } else {
                    format!("level {level} below target {target_level}")
                };
                Assessment::new(ratio.min(1.0), notes)
            }
            None => Assessment::new(0.0, format!("skill {skill_id} not on profile")),
        },
        Criterion::Academic { .. } => match profile.gpa {
            Some(gpa) => Assessment::new(
                gpa / config.gpa_scale,
                format!("gpa {gpa:.2} of {:.2}", config.gpa_scale),
            ),
            None => Assessment::new(0.0, "gpa not recorded".to_string()),
        },
        Criterion::Organization { .. } => Assessment::new(
            profile.organization.credit(),
            format!("organization activity {}", profile.organization.label()),
        ),
        Criterion::Competition { .. } => Assessment::new(
            profile.competition.credit(),
            format!("competition activity {}", profile.competition.label()),
        ),
        Criterion::DisciplinaryScore { .. } => match profile.disciplinary_score {
            Some(score) => {
                let ceiling = f64::from(config.disciplinary_ceiling.max(1));
                let penalty = (f64::from(score) / ceiling).min(1.0);
                Assessment::new(
                    1.0 - penalty,
                    format!(
                        "disciplinary score {score} against ceiling {}",
                        config.disciplinary_ceiling
                    ),
                )
            }
            None => Assessment::new(0.0, "disciplinary score not recorded".to_string()),
        },
        Criterion::MisconductCase { .. } => {
            if profile.misconduct_case {
                Assessment::new(0.0, "active misconduct case".to_string())
            } else {
                Assessment::new(1.0, "no misconduct case".to_string())
            }
        }
    }
}
