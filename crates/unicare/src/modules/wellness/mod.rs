//! Self-reported wellness scoring, recommendations and mood risk flags.

pub mod router;
pub mod scoring;

pub use router::wellness_router;
pub use scoring::{
    assess_check_in, calculate_wellness_score, is_high_risk_mood, should_suggest_challenge,
    wellness_recommendation, Recommendation, WellnessAssessment, WellnessCheckIn,
};
