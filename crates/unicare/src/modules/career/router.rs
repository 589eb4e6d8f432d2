use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalogue::DemoCatalogue;
use super::domain::{CareerDeadline, JobListing, Scholarship};
use super::matching::{calculate_skill_gap, filter_jobs, match_scholarships, upcoming_deadlines};
use crate::datetime::parse_instant;
use crate::error::AppError;

/// `None` when demo mode is off; catalogue reads then answer 501.
#[derive(Clone, Default)]
pub struct CareerState {
    pub catalogue: Option<Arc<DemoCatalogue>>,
}

impl CareerState {
    fn catalogue(&self) -> Result<&DemoCatalogue, AppError> {
        self.catalogue.as_deref().ok_or(AppError::DemoModeDisabled)
    }
}

#[derive(Debug, Deserialize)]
pub struct ScholarshipMatchRequest {
    pub scholarships: Vec<Scholarship>,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobSearchRequest {
    pub jobs: Vec<JobListing>,
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Deserialize)]
pub struct DeadlineRequest {
    pub items: Vec<CareerDeadline>,
    #[serde(default)]
    pub now: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    pub current: Vec<String>,
    pub target: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillGapResponse {
    pub missing: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScholarshipQuery {
    #[serde(default)]
    pub tags: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeadlineQuery {
    #[serde(default)]
    pub now: Option<String>,
}

pub fn career_router(catalogue: Option<Arc<DemoCatalogue>>) -> Router {
    Router::new()
        .route(
            "/api/v1/career/scholarships",
            get(catalogue_scholarships_handler),
        )
        .route(
            "/api/v1/career/scholarships/match",
            post(match_scholarships_handler),
        )
        .route("/api/v1/career/jobs", get(catalogue_jobs_handler))
        .route("/api/v1/career/jobs/search", post(search_jobs_handler))
        .route(
            "/api/v1/career/deadlines",
            get(catalogue_deadlines_handler).post(deadlines_handler),
        )
        .route("/api/v1/career/skill-gap", post(skill_gap_handler))
        .with_state(CareerState { catalogue })
}

fn reference_time(raw: Option<&str>) -> Result<DateTime<Utc>, AppError> {
    match raw {
        Some(value) => parse_instant(value)
            .ok_or_else(|| AppError::Validation(format!("'{value}' is not a valid date/time"))),
        None => Ok(Utc::now()),
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) async fn match_scholarships_handler(
    Json(request): Json<ScholarshipMatchRequest>,
) -> Json<Vec<Scholarship>> {
    let matched = match_scholarships(&request.scholarships, &request.tags);
    Json(matched.into_iter().cloned().collect())
}

pub(crate) async fn search_jobs_handler(
    Json(request): Json<JobSearchRequest>,
) -> Json<Vec<JobListing>> {
    let matched = filter_jobs(&request.jobs, &request.keyword);
    Json(matched.into_iter().cloned().collect())
}

pub(crate) async fn deadlines_handler(
    Json(request): Json<DeadlineRequest>,
) -> Result<Json<Vec<CareerDeadline>>, AppError> {
    let now = reference_time(request.now.as_deref())?;
    let upcoming = upcoming_deadlines(&request.items, now);
    Ok(Json(upcoming.into_iter().cloned().collect()))
}

pub(crate) async fn skill_gap_handler(Json(request): Json<SkillGapRequest>) -> Json<SkillGapResponse> {
    Json(SkillGapResponse {
        missing: calculate_skill_gap(&request.current, &request.target),
    })
}

pub(crate) async fn catalogue_scholarships_handler(
    State(state): State<CareerState>,
    Query(query): Query<ScholarshipQuery>,
) -> Result<Json<Vec<Scholarship>>, AppError> {
    let catalogue = state.catalogue()?;
    let tags = query.tags.as_deref().map(split_tags).unwrap_or_default();
    debug!(?tags, "scholarship catalogue lookup");

    if tags.is_empty() {
        return Ok(Json(catalogue.scholarships.clone()));
    }
    let matched = match_scholarships(&catalogue.scholarships, &tags);
    Ok(Json(matched.into_iter().cloned().collect()))
}

pub(crate) async fn catalogue_jobs_handler(
    State(state): State<CareerState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<Vec<JobListing>>, AppError> {
    let catalogue = state.catalogue()?;
    let keyword = query.keyword.unwrap_or_default();
    let matched = filter_jobs(&catalogue.jobs, &keyword);
    Ok(Json(matched.into_iter().cloned().collect()))
}

pub(crate) async fn catalogue_deadlines_handler(
    State(state): State<CareerState>,
    Query(query): Query<DeadlineQuery>,
) -> Result<Json<Vec<CareerDeadline>>, AppError> {
    let catalogue = state.catalogue()?;
    let now = reference_time(query.now.as_deref())?;
    let deadlines = catalogue.deadlines();
    let upcoming = upcoming_deadlines(&deadlines, now);
    Ok(Json(upcoming.into_iter().cloned().collect()))
}
