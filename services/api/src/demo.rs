use crate::infra::{load_candidates, load_form, load_posting};
use clap::Args;
use placement_spk::config::AppConfig;
use placement_spk::error::AppError;
use placement_spk::workflows::scoring::{
    ActivityLevel, CandidateApplication, CandidateProfile, CriteriaForm, JobPosting, OptionalWeight,
    PostingId, Ranking, ScoringConfig, ScoringEngine, SkillId, SkillRequirement, WeightSummary,
};
use serde_json::json;
use std::path::PathBuf;

const DEMO_POSTING: &str = "lw-demo-backend";

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file describing the job posting
    #[arg(long)]
    pub(crate) posting: PathBuf,
    /// Candidate CSV export; rows for other postings are ignored
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// JSON criteria form (defaults to the standard form)
    #[arg(long)]
    pub(crate) form: Option<PathBuf>,
    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// JSON criteria form to apply to the sample posting
    #[arg(long)]
    pub(crate) form: Option<PathBuf>,
    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        posting,
        candidates,
        form,
        json,
    } = args;

    let config = AppConfig::load()?.scoring;
    let posting = load_posting(&posting)?;
    let form = load_form(form.as_deref())?;
    let profiles = profiles_for(&posting.posting_id, load_candidates(&candidates)?);

    let (summary, ranking) = rank(&posting, &profiles, form, config)?;
    present(&posting, &summary, &ranking, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { form, json } = args;

    let config = AppConfig::load()?.scoring;
    let posting = demo_posting();
    let form = match form {
        Some(path) => load_form(Some(&path))?,
        None => demo_form(),
    };
    let profiles = profiles_for(&posting.posting_id, demo_applications());

    if !json {
        println!("Placement SPK demo");
    }
    let (summary, ranking) = rank(&posting, &profiles, form, config)?;
    present(&posting, &summary, &ranking, json)
}

fn profiles_for(
    posting_id: &PostingId,
    applications: Vec<CandidateApplication>,
) -> Vec<CandidateProfile> {
    applications
        .into_iter()
        .filter(|application| &application.posting_id == posting_id)
        .map(|application| application.profile)
        .collect()
}

fn rank(
    posting: &JobPosting,
    profiles: &[CandidateProfile],
    form: CriteriaForm,
    config: ScoringConfig,
) -> Result<(WeightSummary, Ranking), AppError> {
    let criteria = form.into_criteria_set(posting)?;
    let summary = WeightSummary::from_criteria(&criteria, &config);
    let ranking = ScoringEngine::new(config).rank(&criteria, profiles)?;
    Ok((summary, ranking))
}

fn present(
    posting: &JobPosting,
    summary: &WeightSummary,
    ranking: &Ranking,
    as_json: bool,
) -> Result<(), AppError> {
    if as_json {
        let payload = json!({
            "posting_id": posting.posting_id,
            "summary": summary,
            "weights": ranking.weights,
            "results": ranking.results,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    render_ranking(posting, summary, ranking);
    Ok(())
}

fn render_ranking(posting: &JobPosting, summary: &WeightSummary, ranking: &Ranking) {
    println!("\nPosting {} - {}", posting.posting_id, posting.title);
    println!(
        "- {} of {} required criteria enabled | total weight {}",
        summary.active_criteria, summary.required_criteria, summary.total_weight
    );
    println!("- {}", summary.message);

    println!("Normalized weights:");
    for entry in &ranking.weights.entries {
        println!(
            "  - {}: {} -> {:.3}",
            entry.criterion, entry.raw_weight, entry.weight
        );
    }

    if ranking.results.is_empty() {
        println!("No candidates have applied to this posting.");
        return;
    }

    println!("Ranking:");
    for result in &ranking.results {
        println!(
            "  {:>2}. {} ({}) score {:.4}",
            result.rank, result.name, result.candidate_id, result.score
        );
        for item in &result.breakdown {
            println!(
                "      {:<24} {:.3} x {:.3} = {:.4}  {}",
                item.criterion.to_string(),
                item.contribution,
                item.weight,
                item.weighted,
                item.notes
            );
        }
    }
}

pub(crate) fn demo_posting() -> JobPosting {
    JobPosting {
        posting_id: PostingId(DEMO_POSTING.to_string()),
        title: "Backend Engineering Intern".to_string(),
        required_skills: vec![
            SkillRequirement {
                skill_id: SkillId("rust".to_string()),
                name: "Rust".to_string(),
                target_level: 4,
            },
            SkillRequirement {
                skill_id: SkillId("sql".to_string()),
                name: "SQL".to_string(),
                target_level: 3,
            },
        ],
    }
}

pub(crate) fn demo_form() -> CriteriaForm {
    CriteriaForm {
        organization: OptionalWeight::enabled(10),
        ..CriteriaForm::default()
    }
    .with_skill_weight("rust", 30)
    .with_skill_weight("sql", 25)
}

pub(crate) fn demo_applications() -> Vec<CandidateApplication> {
    let posting_id = PostingId(DEMO_POSTING.to_string());
    let profiles = vec![
        demo_profile(
            "mhs-001",
            "Ayu Lestari",
            &[("rust", 5), ("sql", 3)],
            Some(3.71),
            ActivityLevel::VeryActive,
            false,
        ),
        demo_profile(
            "mhs-002",
            "Bagus Wicaksono",
            &[("rust", 3), ("sql", 4)],
            Some(3.45),
            ActivityLevel::Active,
            false,
        ),
        demo_profile(
            "mhs-003",
            "Citra Maharani",
            &[("rust", 4), ("sql", 2)],
            Some(3.88),
            ActivityLevel::None,
            true,
        ),
        demo_profile(
            "mhs-004",
            "Dimas Saputra",
            &[("sql", 3)],
            None,
            ActivityLevel::Active,
            false,
        ),
    ];

    profiles
        .into_iter()
        .map(|profile| CandidateApplication {
            posting_id: posting_id.clone(),
            profile,
        })
        .collect()
}

fn demo_profile(
    id: &str,
    name: &str,
    skills: &[(&str, u8)],
    gpa: Option<f64>,
    organization: ActivityLevel,
    misconduct_case: bool,
) -> CandidateProfile {
    let mut profile = CandidateProfile::new(id);
    profile.name = name.to_string();
    profile.gpa = gpa;
    profile.organization = organization;
    profile.misconduct_case = misconduct_case;
    profile.skills = skills
        .iter()
        .map(|(skill, level)| (SkillId(skill.to_string()), *level))
        .collect();
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_form_meets_the_minimum() {
        let criteria = demo_form()
            .into_criteria_set(&demo_posting())
            .expect("demo form converts");
        let summary = WeightSummary::from_criteria(&criteria, &ScoringConfig::default());

        assert!(summary.is_ready());
        assert_eq!(summary.total_weight, 100);
    }

    #[test]
    fn demo_ranking_orders_every_applicant() {
        let posting = demo_posting();
        let profiles = profiles_for(&posting.posting_id, demo_applications());
        let (_, ranking) = rank(&posting, &profiles, demo_form(), ScoringConfig::default())
            .expect("demo ranks");

        assert_eq!(ranking.results.len(), 4);
        assert_eq!(ranking.results[0].candidate_id.0, "mhs-001");
        let ranks: Vec<usize> = ranking.results.iter().map(|result| result.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn other_postings_are_filtered_out() {
        let mut applications = demo_applications();
        applications.push(CandidateApplication {
            posting_id: PostingId("lw-other".to_string()),
            profile: CandidateProfile::new("mhs-999"),
        });

        let profiles = profiles_for(&demo_posting().posting_id, applications);
        assert_eq!(profiles.len(), 4);
    }
}
