use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use unicare::access::access_router;
use unicare::modules::aid::aid_router;
use unicare::modules::career::{career_router, DemoCatalogue};
use unicare::modules::mentorship::{mentorship_router, MentorshipService, SessionRepository};
use unicare::modules::notifications::{notifications_router, NotificationStore};
use unicare::modules::wellness::wellness_router;

/// Compose every module router with the operational endpoints.
pub(crate) fn with_module_routes<R, N>(
    mentorship: Arc<MentorshipService<R, N>>,
    notifications: Arc<N>,
    catalogue: Option<Arc<DemoCatalogue>>,
) -> axum::Router
where
    R: SessionRepository + 'static,
    N: NotificationStore + 'static,
{
    access_router()
        .merge(aid_router())
        .merge(wellness_router())
        .merge(career_router(catalogue))
        .merge(mentorship_router(mentorship))
        .merge(notifications_router(notifications))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
