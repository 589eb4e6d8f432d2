use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::modules::mentorship::domain::{MentorshipSession, SessionId, SessionRequest};
use crate::modules::mentorship::repository::{RepositoryError, SessionRepository};
use crate::modules::mentorship::{mentorship_router, MentorshipService, DEFAULT_SESSION_LIMIT};
use crate::modules::notifications::{Notification, NotificationError, NotificationStore};

pub(super) fn request(student_id: &str, topic: &str) -> SessionRequest {
    SessionRequest {
        student_id: student_id.to_string(),
        mentor_id: "mentor-ayesha".to_string(),
        topic: topic.to_string(),
        scheduled_at: "2025-11-03T14:00".to_string(),
    }
}

pub(super) fn build_service() -> (
    MentorshipService<MemoryRepository, MemoryInbox>,
    Arc<MemoryRepository>,
    Arc<MemoryInbox>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let inbox = Arc::new(MemoryInbox::default());
    let service = MentorshipService::new(repository.clone(), inbox.clone(), DEFAULT_SESSION_LIMIT);
    (service, repository, inbox)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, MentorshipSession>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: MentorshipSession) -> Result<MentorshipSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: MentorshipSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard.insert(session.id.clone(), session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<MentorshipSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_student(&self, student_id: &str) -> Result<Vec<MentorshipSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|session| session.student_id == student_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryInbox {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryInbox {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("inbox mutex poisoned").clone()
    }
}

impl NotificationStore for MemoryInbox {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("inbox mutex poisoned")
            .push(notification);
        Ok(())
    }

    fn for_recipient(&self, recipient: &str) -> Result<Vec<Notification>, NotificationError> {
        Ok(self
            .events()
            .into_iter()
            .filter(|notification| notification.recipient == recipient)
            .collect())
    }
}

/// Widens the gap between the open-session count and the insert.
#[derive(Default)]
pub(super) struct SlowRepository {
    pub(super) inner: MemoryRepository,
}

impl SessionRepository for SlowRepository {
    fn insert(&self, session: MentorshipSession) -> Result<MentorshipSession, RepositoryError> {
        self.inner.insert(session)
    }

    fn update(&self, session: MentorshipSession) -> Result<(), RepositoryError> {
        self.inner.update(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<MentorshipSession>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn for_student(&self, student_id: &str) -> Result<Vec<MentorshipSession>, RepositoryError> {
        let sessions = self.inner.for_student(student_id)?;
        std::thread::sleep(std::time::Duration::from_millis(20));
        Ok(sessions)
    }
}

pub(super) struct OfflineInbox;

impl NotificationStore for OfflineInbox {
    fn publish(&self, _notification: Notification) -> Result<(), NotificationError> {
        Err(NotificationError::Unavailable("mail relay offline".to_string()))
    }

    fn for_recipient(&self, _recipient: &str) -> Result<Vec<Notification>, NotificationError> {
        Err(NotificationError::Unavailable("mail relay offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _session: MentorshipSession) -> Result<MentorshipSession, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _session: MentorshipSession) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<MentorshipSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_student(&self, _student_id: &str) -> Result<Vec<MentorshipSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_service(
    service: MentorshipService<MemoryRepository, MemoryInbox>,
) -> axum::Router {
    mentorship_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 8192)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
