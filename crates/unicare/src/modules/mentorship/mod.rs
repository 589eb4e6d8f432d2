//! Mentorship scheduling rules and the session workflow built on them.

pub mod domain;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{MentorshipSession, SessionId, SessionRequest, SessionStatus};
pub use repository::{RepositoryError, SessionRepository};
pub use router::mentorship_router;
pub use rules::{
    calculate_mentor_score, can_schedule_session, format_session_topic, is_feedback_required,
    is_valid_session_time, DEFAULT_SESSION_LIMIT,
};
pub use service::{MentorshipError, MentorshipService, SessionOutcome};
