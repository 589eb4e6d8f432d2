use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{SessionId, SessionRequest};
use super::repository::{RepositoryError, SessionRepository};
use super::rules::calculate_mentor_score;
use super::service::{MentorshipError, MentorshipService};
use crate::error::AppError;
use crate::modules::notifications::NotificationStore;

const MAX_RATING: f64 = 5.0;

#[derive(Debug, Deserialize)]
pub struct StudentSessionsQuery {
    pub student_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MentorScoreRequest {
    pub rating: f64,
    pub session_count: u32,
}

#[derive(Debug, Serialize)]
pub struct MentorScoreResponse {
    pub score: f64,
}

/// Router exposing session booking, status changes and mentor scoring.
pub fn mentorship_router<R, N>(service: Arc<MentorshipService<R, N>>) -> Router
where
    R: SessionRepository + 'static,
    N: NotificationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/mentorship/sessions",
            post(schedule_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route(
            "/api/v1/mentorship/sessions/:session_id/confirm",
            post(confirm_handler::<R, N>),
        )
        .route(
            "/api/v1/mentorship/sessions/:session_id/complete",
            post(complete_handler::<R, N>),
        )
        .route("/api/v1/mentorship/mentors/score", post(mentor_score_handler))
        .with_state(service)
}

fn error_response(err: MentorshipError) -> Response {
    let status = match &err {
        MentorshipError::InvalidSessionTime(_)
        | MentorshipError::EmptyTopic
        | MentorshipError::SessionLimitReached { .. }
        | MentorshipError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
        MentorshipError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MentorshipError::Repository(_) => {
            error!(error = %err, "mentorship workflow failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn schedule_handler<R, N>(
    State(service): State<Arc<MentorshipService<R, N>>>,
    Json(request): Json<SessionRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    N: NotificationStore + 'static,
{
    match service.schedule(request) {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<MentorshipService<R, N>>>,
    Query(query): Query<StudentSessionsQuery>,
) -> Response
where
    R: SessionRepository + 'static,
    N: NotificationStore + 'static,
{
    match service.sessions_for(&query.student_id) {
        Ok(sessions) => {
            let payload = json!({
                "student_id": query.student_id,
                "session_limit": service.session_limit(),
                "sessions": sessions,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn confirm_handler<R, N>(
    State(service): State<Arc<MentorshipService<R, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    N: NotificationStore + 'static,
{
    match service.confirm(&SessionId(session_id)) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn complete_handler<R, N>(
    State(service): State<Arc<MentorshipService<R, N>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    N: NotificationStore + 'static,
{
    match service.complete(&SessionId(session_id)) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn mentor_score_handler(
    Json(request): Json<MentorScoreRequest>,
) -> Result<Json<MentorScoreResponse>, AppError> {
    if !request.rating.is_finite() || !(0.0..=MAX_RATING).contains(&request.rating) {
        return Err(AppError::Validation(format!(
            "rating must be between 0 and {MAX_RATING}"
        )));
    }

    let score = calculate_mentor_score(request.rating, request.session_count);
    Ok(Json(MentorScoreResponse { score }))
}
