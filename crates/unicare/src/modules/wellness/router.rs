use axum::{routing::post, Json, Router};
use tracing::{info, warn};

use super::scoring::{assess_check_in, WellnessAssessment, WellnessCheckIn};
use crate::error::AppError;

const HOURS_PER_DAY: f64 = 24.0;

pub fn wellness_router() -> Router {
    Router::new().route("/api/v1/wellness/check-in", post(check_in_handler))
}

pub(crate) async fn check_in_handler(
    Json(check_in): Json<WellnessCheckIn>,
) -> Result<Json<WellnessAssessment>, AppError> {
    if !check_in.sleep_hours.is_finite()
        || !(0.0..=HOURS_PER_DAY).contains(&check_in.sleep_hours)
    {
        return Err(AppError::Validation(format!(
            "sleep_hours must be between 0 and {HOURS_PER_DAY}"
        )));
    }

    let assessment = assess_check_in(&check_in);
    if assessment.high_risk_mood {
        warn!(
            score = assessment.score,
            "high-risk mood reported during wellness check-in"
        );
    } else {
        info!(score = assessment.score, recommendation = ?assessment.recommendation, "wellness check-in assessed");
    }

    Ok(Json(assessment))
}
