use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::scoring::criteria::{CriteriaForm, CriteriaSet, Criterion, OptionalWeight};
use crate::workflows::scoring::domain::{
    ActivityLevel, CandidateProfile, JobPosting, PostingId, SkillId, SkillRequirement,
};
use crate::workflows::scoring::evaluation::{ScoringConfig, ScoringEngine};
use crate::workflows::scoring::repository::{
    CandidateRepository, PostingRepository, RepositoryError,
};
use crate::workflows::scoring::{scoring_router, ScoringService};

pub(super) const POSTING: &str = "lw-backend-01";

pub(super) fn posting_id() -> PostingId {
    PostingId(POSTING.to_string())
}

pub(super) fn skill(id: &str) -> SkillId {
    SkillId(id.to_string())
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(scoring_config())
}

pub(super) fn posting() -> JobPosting {
    JobPosting {
        posting_id: posting_id(),
        title: "Backend Engineering Intern".to_string(),
        required_skills: vec![
            SkillRequirement {
                skill_id: skill("rust"),
                name: "Rust".to_string(),
                target_level: 4,
            },
            SkillRequirement {
                skill_id: skill("sql"),
                name: "SQL".to_string(),
                target_level: 4,
            },
        ],
    }
}

/// skill rust 30, skill sql 30, academic 20, organization 10, misconduct 10.
pub(super) fn reference_form() -> CriteriaForm {
    CriteriaForm {
        academic: OptionalWeight::enabled(20),
        organization: OptionalWeight::enabled(10),
        competition: OptionalWeight::disabled(10),
        disciplinary_score: OptionalWeight::disabled(15),
        misconduct_case: OptionalWeight::enabled(10),
        ..CriteriaForm::default()
    }
    .with_skill_weight("rust", 30)
    .with_skill_weight("sql", 30)
}

pub(super) fn reference_criteria() -> CriteriaSet {
    CriteriaSet::new(
        posting_id(),
        vec![
            Criterion::Skill {
                skill_id: skill("rust"),
                target_level: 4,
                weight: 30,
            },
            Criterion::Skill {
                skill_id: skill("sql"),
                target_level: 4,
                weight: 30,
            },
            Criterion::Academic { weight: 20 },
            Criterion::Organization { weight: 10 },
            Criterion::MisconductCase { weight: 10 },
        ],
    )
}

/// Every criterion kind enabled, seven in total.
pub(super) fn full_criteria() -> CriteriaSet {
    let mut criteria = reference_criteria();
    criteria.criteria.push(Criterion::Competition { weight: 15 });
    criteria
        .criteria
        .push(Criterion::DisciplinaryScore { weight: 15 });
    criteria
}

/// Meets the rust target, half the sql target, GPA 3.2, active in organisations.
pub(super) fn reference_candidate(id: &str) -> CandidateProfile {
    let mut profile = CandidateProfile::new(id);
    profile.name = format!("Candidate {id}");
    profile.skills.insert(skill("rust"), 4);
    profile.skills.insert(skill("sql"), 2);
    profile.gpa = Some(3.2);
    profile.organization = ActivityLevel::Active;
    profile
}

pub(super) fn strong_candidate(id: &str) -> CandidateProfile {
    let mut profile = CandidateProfile::new(id);
    profile.skills.insert(skill("rust"), 5);
    profile.skills.insert(skill("sql"), 4);
    profile.gpa = Some(3.9);
    profile.organization = ActivityLevel::VeryActive;
    profile.competition = ActivityLevel::VeryActive;
    profile.disciplinary_score = Some(0);
    profile
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[derive(Default, Clone)]
pub(super) struct MemoryPostings {
    pub(super) postings: Arc<Mutex<HashMap<PostingId, JobPosting>>>,
}

impl MemoryPostings {
    pub(super) fn with(posting: JobPosting) -> Self {
        let repository = Self::default();
        repository
            .postings
            .lock()
            .expect("posting mutex poisoned")
            .insert(posting.posting_id.clone(), posting);
        repository
    }
}

impl PostingRepository for MemoryPostings {
    fn fetch(&self, id: &PostingId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.postings.lock().expect("posting mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCandidates {
    pub(super) candidates: Arc<Mutex<HashMap<PostingId, Vec<CandidateProfile>>>>,
}

impl MemoryCandidates {
    pub(super) fn add(&self, posting_id: PostingId, profile: CandidateProfile) {
        self.candidates
            .lock()
            .expect("candidate mutex poisoned")
            .entry(posting_id)
            .or_default()
            .push(profile);
    }
}

impl CandidateRepository for MemoryCandidates {
    fn candidates_for(
        &self,
        posting_id: &PostingId,
    ) -> Result<Vec<CandidateProfile>, RepositoryError> {
        let guard = self.candidates.lock().expect("candidate mutex poisoned");
        Ok(guard.get(posting_id).cloned().unwrap_or_default())
    }
}

pub(super) struct OfflineCandidates;

impl CandidateRepository for OfflineCandidates {
    fn candidates_for(
        &self,
        _posting_id: &PostingId,
    ) -> Result<Vec<CandidateProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    ScoringService<MemoryPostings, MemoryCandidates>,
    Arc<MemoryCandidates>,
) {
    let postings = Arc::new(MemoryPostings::with(posting()));
    let candidates = Arc::new(MemoryCandidates::default());
    candidates.add(posting_id(), reference_candidate("mhs-02"));
    candidates.add(posting_id(), strong_candidate("mhs-01"));
    let service = ScoringService::new(postings, candidates.clone(), scoring_config());
    (service, candidates)
}

pub(super) fn router_with_service(
    service: ScoringService<MemoryPostings, MemoryCandidates>,
) -> axum::Router {
    scoring_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
