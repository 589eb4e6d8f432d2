use axum::{
    extract::Query,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::gate::{gate_dashboard_request, role_from_cookie_header};
use super::role::{has_role_access, resolve_dashboard_path, Role};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResolution {
    pub path: &'static str,
    pub role: Option<Role>,
    pub recognized: bool,
}

#[derive(Debug, Deserialize)]
pub struct AccessCheckRequest {
    pub user_role: String,
    pub required_role: String,
}

#[derive(Debug, Serialize)]
pub struct AccessCheckResponse {
    pub user_role: Role,
    pub required_role: Role,
    pub allowed: bool,
}

/// Dashboard gating plus the role lookup endpoints.
pub fn access_router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_page_handler))
        .route("/dashboard/*rest", get(dashboard_page_handler))
        .route("/api/v1/access/dashboard", get(resolve_dashboard_handler))
        .route("/api/v1/access/check", post(access_check_handler))
}

pub(crate) async fn dashboard_page_handler(uri: Uri, headers: HeaderMap) -> Response {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(role_from_cookie_header);

    let decision = gate_dashboard_request(uri.path(), cookie);
    debug!(path = uri.path(), ?decision, "dashboard gate evaluated");

    if let Some(location) = decision.location() {
        return Redirect::to(location).into_response();
    }

    let role = cookie
        .and_then(|value| value.parse::<Role>().ok())
        .unwrap_or(Role::Student);
    let payload = json!({
        "dashboard": uri.path(),
        "role": role.label(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn resolve_dashboard_handler(
    Query(query): Query<DashboardQuery>,
) -> Json<DashboardResolution> {
    let role = query
        .role
        .as_deref()
        .and_then(|value| value.parse::<Role>().ok());

    Json(DashboardResolution {
        path: resolve_dashboard_path(query.role.as_deref()),
        role,
        recognized: role.is_some(),
    })
}

pub(crate) async fn access_check_handler(
    Json(request): Json<AccessCheckRequest>,
) -> Result<Json<AccessCheckResponse>, AppError> {
    let user_role = request.user_role.parse::<Role>()?;
    let required_role = request.required_role.parse::<Role>()?;

    Ok(Json(AccessCheckResponse {
        user_role,
        required_role,
        allowed: has_role_access(user_role, required_role),
    }))
}
