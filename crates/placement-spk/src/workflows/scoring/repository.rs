use super::domain::{CandidateProfile, JobPosting, PostingId};

/// Read access to postings and the skills they require.
pub trait PostingRepository: Send + Sync {
    fn fetch(&self, id: &PostingId) -> Result<Option<JobPosting>, RepositoryError>;
}

/// Read access to the candidate profiles that applied to a posting.
pub trait CandidateRepository: Send + Sync {
    fn candidates_for(&self, posting_id: &PostingId)
        -> Result<Vec<CandidateProfile>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
