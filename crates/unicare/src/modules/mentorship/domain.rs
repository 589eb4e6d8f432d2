use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Pending,
    Confirmed,
    Completed,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Completed => "completed",
        }
    }

    /// Sessions that still occupy one of the student's scheduling slots.
    pub const fn is_open(self) -> bool {
        !matches!(self, SessionStatus::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorshipSession {
    pub id: SessionId,
    pub student_id: String,
    pub mentor_id: String,
    pub topic: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: SessionStatus,
}

/// Booking request as submitted from the scheduling form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub student_id: String,
    pub mentor_id: String,
    pub topic: String,
    pub scheduled_at: String,
}
