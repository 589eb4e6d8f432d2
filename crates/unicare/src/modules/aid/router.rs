use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::AidScoreInput;
use super::scoring::{
    calculate_aid_score, can_request_equipment, is_eligible_for_emergency_aid, normalize_amount,
    payment_plan_months, EMERGENCY_AID_THRESHOLD,
};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct AidScoreResponse {
    pub score: i32,
    pub threshold: i32,
    pub eligible_for_emergency_aid: bool,
}

#[derive(Debug, Deserialize)]
pub struct PaymentPlanRequest {
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentPlanResponse {
    pub amount: f64,
    pub months: u8,
}

#[derive(Debug, Deserialize)]
pub struct EquipmentEligibilityRequest {
    #[serde(default)]
    pub has_pending_request: bool,
}

#[derive(Debug, Serialize)]
pub struct EquipmentEligibilityResponse {
    pub allowed: bool,
}

pub fn aid_router() -> Router {
    Router::new()
        .route("/api/v1/aid/score", post(aid_score_handler))
        .route("/api/v1/aid/payment-plan", post(payment_plan_handler))
        .route(
            "/api/v1/aid/equipment/eligibility",
            post(equipment_eligibility_handler),
        )
}

pub(crate) async fn aid_score_handler(Json(input): Json<AidScoreInput>) -> Json<AidScoreResponse> {
    let score = calculate_aid_score(&input);
    let eligible = is_eligible_for_emergency_aid(score);
    info!(score, eligible, income_level = ?input.income_level, "aid score calculated");

    Json(AidScoreResponse {
        score,
        threshold: EMERGENCY_AID_THRESHOLD,
        eligible_for_emergency_aid: eligible,
    })
}

pub(crate) async fn payment_plan_handler(
    Json(request): Json<PaymentPlanRequest>,
) -> Result<Json<PaymentPlanResponse>, AppError> {
    let amount = normalize_amount(&request.amount)?;
    Ok(Json(PaymentPlanResponse {
        amount,
        months: payment_plan_months(amount),
    }))
}

pub(crate) async fn equipment_eligibility_handler(
    Json(request): Json<EquipmentEligibilityRequest>,
) -> Json<EquipmentEligibilityResponse> {
    Json(EquipmentEligibilityResponse {
        allowed: can_request_equipment(request.has_pending_request),
    })
}
