use super::domain::AidScoreInput;

/// Minimum score that qualifies an applicant for emergency aid.
pub const EMERGENCY_AID_THRESHOLD: i32 = 25;

const SHORT_PLAN_CEILING: f64 = 50_000.0;
const STANDARD_PLAN_CEILING: f64 = 150_000.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount '{0}' contains no digits")]
    NoDigits(String),
    #[error("amount '{0}' is not a valid number")]
    Malformed(String),
}

/// Weighted need score: income band dominates, urgency and dependents refine.
pub fn calculate_aid_score(input: &AidScoreInput) -> i32 {
    let urgency = input.urgency.clamp(1, 10);
    let dependents = input.dependents.clamp(0, 5);
    input.income_level.weight() * 10 + urgency + dependents
}

pub fn is_eligible_for_emergency_aid(score: i32) -> bool {
    score >= EMERGENCY_AID_THRESHOLD
}

/// Parse a free-form amount such as `"LKR 12,000"`.
///
/// Every character other than ASCII digits and `.` is discarded before
/// parsing, so currency codes, separators and signs are ignored.
pub fn normalize_amount(text: &str) -> Result<f64, AmountError> {
    let cleaned: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();

    if !cleaned.chars().any(|ch| ch.is_ascii_digit()) {
        return Err(AmountError::NoDigits(text.to_string()));
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| AmountError::Malformed(text.to_string()))
}

/// Instalment count for a requested amount; tier ceilings are inclusive.
pub fn payment_plan_months(amount: f64) -> u8 {
    if amount <= SHORT_PLAN_CEILING {
        6
    } else if amount <= STANDARD_PLAN_CEILING {
        12
    } else {
        24
    }
}

/// Only one equipment request may be outstanding per applicant.
pub fn can_request_equipment(has_pending_request: bool) -> bool {
    !has_pending_request
}
