use metrics_exporter_prometheus::PrometheusHandle;
use placement_spk::error::AppError;
use placement_spk::workflows::scoring::{
    CandidateApplication, CandidateCsvImporter, CandidateProfile, CandidateRepository,
    CriteriaForm, JobPosting, PostingId, PostingRepository, RepositoryError,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPostingRepository {
    postings: Arc<Mutex<HashMap<PostingId, JobPosting>>>,
}

impl InMemoryPostingRepository {
    pub(crate) fn insert(&self, posting: JobPosting) {
        let mut guard = self.postings.lock().expect("posting mutex poisoned");
        guard.insert(posting.posting_id.clone(), posting);
    }

    pub(crate) fn len(&self) -> usize {
        self.postings.lock().expect("posting mutex poisoned").len()
    }
}

impl PostingRepository for InMemoryPostingRepository {
    fn fetch(&self, id: &PostingId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.postings.lock().expect("posting mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    applications: Arc<Mutex<HashMap<PostingId, Vec<CandidateProfile>>>>,
}

impl InMemoryCandidateRepository {
    pub(crate) fn insert(&self, application: CandidateApplication) {
        let mut guard = self.applications.lock().expect("candidate mutex poisoned");
        guard
            .entry(application.posting_id)
            .or_default()
            .push(application.profile);
    }

    pub(crate) fn extend(&self, applications: impl IntoIterator<Item = CandidateApplication>) {
        for application in applications {
            self.insert(application);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.applications
            .lock()
            .expect("candidate mutex poisoned")
            .values()
            .map(Vec::len)
            .sum()
    }
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn candidates_for(
        &self,
        posting_id: &PostingId,
    ) -> Result<Vec<CandidateProfile>, RepositoryError> {
        let guard = self.applications.lock().expect("candidate mutex poisoned");
        Ok(guard.get(posting_id).cloned().unwrap_or_default())
    }
}

pub(crate) fn load_postings(path: &Path) -> Result<Vec<JobPosting>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn load_posting(path: &Path) -> Result<JobPosting, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn load_form(path: Option<&Path>) -> Result<CriteriaForm, AppError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(CriteriaForm::default()),
    }
}

pub(crate) fn load_candidates(path: &Path) -> Result<Vec<CandidateApplication>, AppError> {
    Ok(CandidateCsvImporter::from_path(path)?)
}
