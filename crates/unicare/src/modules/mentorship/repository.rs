use super::domain::{MentorshipSession, SessionId};

/// Session storage injected into the service; the demo build keeps it in memory.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: MentorshipSession) -> Result<MentorshipSession, RepositoryError>;
    fn update(&self, session: MentorshipSession) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<MentorshipSession>, RepositoryError>;
    fn for_student(&self, student_id: &str) -> Result<Vec<MentorshipSession>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
