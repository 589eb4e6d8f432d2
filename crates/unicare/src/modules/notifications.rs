//! In-app notifications raised by module workflows.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SessionScheduled,
    SessionConfirmed,
    FeedbackRequested,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: String,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Outbound notification hook plus the inbox read used by the dashboard.
pub trait NotificationStore: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError>;
    fn for_recipient(&self, recipient: &str) -> Result<Vec<Notification>, NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Deserialize)]
pub struct InboxQuery {
    pub recipient: String,
}

pub fn notifications_router<N>(store: Arc<N>) -> Router
where
    N: NotificationStore + 'static,
{
    Router::new()
        .route("/api/v1/notifications", get(inbox_handler::<N>))
        .with_state(store)
}

pub(crate) async fn inbox_handler<N>(
    State(store): State<Arc<N>>,
    Query(query): Query<InboxQuery>,
) -> Response
where
    N: NotificationStore + 'static,
{
    match store.for_recipient(&query.recipient) {
        Ok(notifications) => (StatusCode::OK, Json(notifications)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryInbox {
        items: Mutex<Vec<Notification>>,
    }

    impl NotificationStore for MemoryInbox {
        fn publish(&self, notification: Notification) -> Result<(), NotificationError> {
            self.items
                .lock()
                .expect("inbox mutex poisoned")
                .push(notification);
            Ok(())
        }

        fn for_recipient(&self, recipient: &str) -> Result<Vec<Notification>, NotificationError> {
            Ok(self
                .items
                .lock()
                .expect("inbox mutex poisoned")
                .iter()
                .filter(|item| item.recipient == recipient)
                .cloned()
                .collect())
        }
    }

    struct OfflineInbox;

    impl NotificationStore for OfflineInbox {
        fn publish(&self, _notification: Notification) -> Result<(), NotificationError> {
            Err(NotificationError::Unavailable("offline".to_string()))
        }

        fn for_recipient(&self, _recipient: &str) -> Result<Vec<Notification>, NotificationError> {
            Err(NotificationError::Unavailable("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn inbox_only_returns_recipient_notifications() {
        let store = Arc::new(MemoryInbox::default());
        for recipient in ["stu-1", "stu-2"] {
            store
                .publish(Notification {
                    recipient: recipient.to_string(),
                    kind: NotificationKind::SessionScheduled,
                    message: "Session booked".to_string(),
                    created_at: Utc::now(),
                })
                .expect("publish succeeds");
        }

        let response = inbox_handler(
            State(store),
            Query(InboxQuery {
                recipient: "stu-2".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        let payload: Vec<Notification> = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].recipient, "stu-2");
    }

    #[tokio::test]
    async fn inbox_reports_store_failures() {
        let response = inbox_handler(
            State(Arc::new(OfflineInbox)),
            Query(InboxQuery {
                recipient: "stu-1".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
