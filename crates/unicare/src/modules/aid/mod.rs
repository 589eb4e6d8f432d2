//! Financial aid eligibility scoring and payment-plan rules.

pub mod domain;
pub mod router;
pub mod scoring;

pub use domain::{AidScoreInput, IncomeLevel};
pub use router::aid_router;
pub use scoring::{
    calculate_aid_score, can_request_equipment, is_eligible_for_emergency_aid, normalize_amount,
    payment_plan_months, AmountError, EMERGENCY_AID_THRESHOLD,
};
