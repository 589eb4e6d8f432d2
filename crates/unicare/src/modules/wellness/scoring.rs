use serde::{Deserialize, Serialize};

const HIGH_STRESS: i32 = 7;
const MODERATE_STRESS: i32 = 4;
const MINIMUM_RESTFUL_SLEEP: f64 = 6.0;
const CHALLENGE_SCORE_CEILING: i32 = 7;
const HIGH_RISK_MOODS: [&str; 2] = ["low", "anxious"];

/// Guidance tier returned to a student after a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    RestAndCounseling,
    Mindfulness,
    MaintainBalance,
}

impl Recommendation {
    pub const fn message(self) -> &'static str {
        match self {
            Recommendation::RestAndCounseling => {
                "Your stress is high or your sleep is short. Prioritise rest and consider booking a counseling session."
            }
            Recommendation::Mindfulness => {
                "Moderate stress detected. Try a short mindfulness or breathing exercise today."
            }
            Recommendation::MaintainBalance => {
                "You're doing well. Keep maintaining a healthy balance of study, rest and activity."
            }
        }
    }

    /// High-risk conditions are checked first and short-circuit the rest.
    pub fn for_check_in(stress_level: i32, sleep_hours: f64) -> Self {
        if stress_level >= HIGH_STRESS || sleep_hours < MINIMUM_RESTFUL_SLEEP {
            Recommendation::RestAndCounseling
        } else if stress_level >= MODERATE_STRESS {
            Recommendation::Mindfulness
        } else {
            Recommendation::MaintainBalance
        }
    }
}

/// Composite 0-10 score from inverse stress and sleep adequacy.
///
/// Stress is not clamped on input, so values below zero still raise the
/// stress component. Sleep is capped at ten hours.
pub fn calculate_wellness_score(stress_level: i32, sleep_hours: f64) -> i32 {
    let stress_score = f64::from(10_i32.saturating_sub(stress_level).max(0));
    let sleep_score = sleep_hours.clamp(0.0, 10.0);
    ((stress_score + sleep_score) / 2.0).round() as i32
}

pub fn wellness_recommendation(stress_level: i32, sleep_hours: f64) -> &'static str {
    Recommendation::for_check_in(stress_level, sleep_hours).message()
}

pub fn is_high_risk_mood(mood: &str) -> bool {
    let normalized = mood.trim().to_lowercase();
    HIGH_RISK_MOODS.contains(&normalized.as_str())
}

pub fn should_suggest_challenge(score: i32) -> bool {
    score < CHALLENGE_SCORE_CEILING
}

/// A daily wellness check-in as submitted by a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessCheckIn {
    pub stress_level: i32,
    pub sleep_hours: f64,
    #[serde(default)]
    pub mood: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellnessAssessment {
    pub score: i32,
    pub recommendation: Recommendation,
    pub message: &'static str,
    pub high_risk_mood: bool,
    pub suggest_challenge: bool,
}

pub fn assess_check_in(check_in: &WellnessCheckIn) -> WellnessAssessment {
    let score = calculate_wellness_score(check_in.stress_level, check_in.sleep_hours);
    let recommendation = Recommendation::for_check_in(check_in.stress_level, check_in.sleep_hours);

    WellnessAssessment {
        score,
        recommendation,
        message: recommendation.message(),
        high_risk_mood: check_in.mood.as_deref().is_some_and(is_high_risk_mood),
        suggest_challenge: should_suggest_challenge(score),
    }
}
