use serde::{Deserialize, Serialize};

/// Self-declared household income band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeLevel {
    Low,
    Medium,
    High,
}

impl IncomeLevel {
    /// Need weight; lower income weighs more.
    pub const fn weight(self) -> i32 {
        match self {
            IncomeLevel::Low => 3,
            IncomeLevel::Medium => 2,
            IncomeLevel::High => 1,
        }
    }
}

/// Applicant attributes feeding the aid score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AidScoreInput {
    pub income_level: IncomeLevel,
    pub urgency: i32,
    pub dependents: i32,
}
