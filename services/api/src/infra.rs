use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;
use unicare::config::DemoConfig;
use unicare::modules::career::{CatalogueError, DemoCatalogue};
use unicare::modules::mentorship::{
    MentorshipSession, RepositoryError, SessionId, SessionRepository,
};
use unicare::modules::notifications::{Notification, NotificationError, NotificationStore};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Demo-mode session store, owned by the server and injected into the service.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, MentorshipSession>>>,
}

impl InMemorySessionRepository {
    fn guard(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, MentorshipSession>>, RepositoryError>
    {
        self.sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: MentorshipSession) -> Result<MentorshipSession, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: MentorshipSession) -> Result<(), RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&session.id) {
            guard.insert(session.id.clone(), session);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<MentorshipSession>, RepositoryError> {
        Ok(self.guard()?.get(id).cloned())
    }

    fn for_student(&self, student_id: &str) -> Result<Vec<MentorshipSession>, RepositoryError> {
        Ok(self
            .guard()?
            .values()
            .filter(|session| session.student_id == student_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationStore {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotificationStore {
    fn guard(&self) -> Result<std::sync::MutexGuard<'_, Vec<Notification>>, NotificationError> {
        self.events
            .lock()
            .map_err(|_| NotificationError::Unavailable("notification store poisoned".to_string()))
    }

    pub(crate) fn events(&self) -> Vec<Notification> {
        self.guard().map(|events| events.clone()).unwrap_or_default()
    }
}

impl NotificationStore for InMemoryNotificationStore {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
        self.guard()?.push(notification);
        Ok(())
    }

    fn for_recipient(&self, recipient: &str) -> Result<Vec<Notification>, NotificationError> {
        Ok(self
            .guard()?
            .iter()
            .filter(|notification| notification.recipient == recipient)
            .cloned()
            .collect())
    }
}

/// Catalogue served by the career endpoints; `None` outside demo mode.
pub(crate) fn load_catalogue(
    config: &DemoConfig,
) -> Result<Option<Arc<DemoCatalogue>>, CatalogueError> {
    if !config.enabled {
        info!("demo mode disabled; catalogue endpoints will answer 501");
        return Ok(None);
    }

    let catalogue = match &config.catalogue_path {
        Some(path) => DemoCatalogue::standard().with_scholarships_from_path(path)?,
        None => DemoCatalogue::standard(),
    };
    Ok(Some(Arc::new(catalogue)))
}
