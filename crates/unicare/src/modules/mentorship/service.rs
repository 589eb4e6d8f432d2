use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{MentorshipSession, SessionId, SessionRequest, SessionStatus};
use super::repository::{RepositoryError, SessionRepository};
use super::rules::{can_schedule_session, format_session_topic, is_feedback_required};
use crate::datetime::parse_instant;
use crate::modules::notifications::{Notification, NotificationKind, NotificationStore};

/// Session workflow over an injected repository and notification store.
pub struct MentorshipService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
    session_limit: usize,
    sequence: AtomicU64,
    /// Held across the open-session count and the insert.
    scheduling: Mutex<()>,
}

/// A session after a status change, with the follow-up it triggers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub session: MentorshipSession,
    pub feedback_required: bool,
}

impl<R, N> MentorshipService<R, N>
where
    R: SessionRepository + 'static,
    N: NotificationStore + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, session_limit: usize) -> Self {
        Self {
            repository,
            notifications,
            session_limit,
            sequence: AtomicU64::new(1),
            scheduling: Mutex::new(()),
        }
    }

    pub fn session_limit(&self) -> usize {
        self.session_limit
    }

    fn next_session_id(&self) -> SessionId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        SessionId(format!("session-{id:05}"))
    }

    /// Book a pending session when the student still has a free slot.
    pub fn schedule(
        &self,
        request: SessionRequest,
    ) -> Result<MentorshipSession, MentorshipError> {
        let scheduled_at = parse_instant(&request.scheduled_at)
            .ok_or_else(|| MentorshipError::InvalidSessionTime(request.scheduled_at.clone()))?;

        let topic = format_session_topic(&request.topic);
        if topic.is_empty() {
            return Err(MentorshipError::EmptyTopic);
        }

        let _slot = self
            .scheduling
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let open_sessions = self
            .repository
            .for_student(&request.student_id)?
            .iter()
            .filter(|session| session.status.is_open())
            .count();
        if !can_schedule_session(open_sessions, self.session_limit) {
            debug!(
                student_id = %request.student_id,
                open_sessions,
                limit = self.session_limit,
                "session limit reached"
            );
            return Err(MentorshipError::SessionLimitReached {
                limit: self.session_limit,
            });
        }

        let session = self.repository.insert(MentorshipSession {
            id: self.next_session_id(),
            student_id: request.student_id,
            mentor_id: request.mentor_id,
            topic,
            scheduled_at,
            status: SessionStatus::Pending,
        })?;

        self.notify(Notification {
            recipient: session.mentor_id.clone(),
            kind: NotificationKind::SessionScheduled,
            message: format!(
                "New mentorship request '{}' for {}",
                session.topic,
                session.scheduled_at.format("%Y-%m-%d %H:%M UTC")
            ),
            created_at: Utc::now(),
        });

        info!(session_id = %session.id.0, "mentorship session scheduled");
        Ok(session)
    }

    pub fn confirm(&self, id: &SessionId) -> Result<SessionOutcome, MentorshipError> {
        let outcome = self.transition(id, SessionStatus::Confirmed)?;

        self.notify(Notification {
            recipient: outcome.session.student_id.clone(),
            kind: NotificationKind::SessionConfirmed,
            message: format!("Your session '{}' is confirmed", outcome.session.topic),
            created_at: Utc::now(),
        });

        Ok(outcome)
    }

    /// Mark a session completed and ask the student for feedback.
    pub fn complete(&self, id: &SessionId) -> Result<SessionOutcome, MentorshipError> {
        let outcome = self.transition(id, SessionStatus::Completed)?;

        if outcome.feedback_required {
            self.notify(Notification {
                recipient: outcome.session.student_id.clone(),
                kind: NotificationKind::FeedbackRequested,
                message: format!(
                    "How was '{}'? Please leave feedback for your mentor",
                    outcome.session.topic
                ),
                created_at: Utc::now(),
            });
        }

        Ok(outcome)
    }

    pub fn sessions_for(&self, student_id: &str) -> Result<Vec<MentorshipSession>, MentorshipError> {
        let mut sessions = self.repository.for_student(student_id)?;
        sessions.sort_by_key(|session| session.scheduled_at);
        Ok(sessions)
    }

    /// Delivery failures are logged; the stored session change stands.
    fn notify(&self, notification: Notification) {
        let recipient = notification.recipient.clone();
        let kind = notification.kind;
        if let Err(err) = self.notifications.publish(notification) {
            warn!(%recipient, ?kind, error = %err, "notification not delivered");
        }
    }

    fn transition(
        &self,
        id: &SessionId,
        next: SessionStatus,
    ) -> Result<SessionOutcome, MentorshipError> {
        let mut session = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        let allowed = matches!(
            (session.status, next),
            (SessionStatus::Pending, SessionStatus::Confirmed)
                | (SessionStatus::Pending, SessionStatus::Completed)
                | (SessionStatus::Confirmed, SessionStatus::Completed)
        );
        if !allowed {
            return Err(MentorshipError::InvalidTransition {
                from: session.status,
                to: next,
            });
        }

        session.status = next;
        self.repository.update(session.clone())?;
        info!(session_id = %session.id.0, status = next.label(), "mentorship session updated");

        Ok(SessionOutcome {
            feedback_required: is_feedback_required(session.status),
            session,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MentorshipError {
    #[error("'{0}' is not a valid session time")]
    InvalidSessionTime(String),
    #[error("session topic must not be empty")]
    EmptyTopic,
    #[error("session limit of {limit} open sessions reached")]
    SessionLimitReached { limit: usize },
    #[error("cannot move session from {} to {}", .from.label(), .to.label())]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
