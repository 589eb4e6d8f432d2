use super::domain::SessionStatus;
use crate::datetime::parse_instant;

pub const DEFAULT_SESSION_LIMIT: usize = 3;

const MENTOR_SESSION_CREDIT_CAP: u32 = 20;

pub fn can_schedule_session(existing: usize, limit: usize) -> bool {
    existing < limit
}

/// Rating dominates; session volume adds at most twenty points.
pub fn calculate_mentor_score(rating: f64, session_count: u32) -> f64 {
    rating * 10.0 + f64::from(session_count.min(MENTOR_SESSION_CREDIT_CAP))
}

pub fn is_feedback_required(status: SessionStatus) -> bool {
    status == SessionStatus::Completed
}

pub fn is_valid_session_time(raw: &str) -> bool {
    parse_instant(raw).is_some()
}

/// Collapse internal whitespace runs to single spaces and trim the ends.
pub fn format_session_topic(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_limit_is_strict() {
        assert!(can_schedule_session(2, DEFAULT_SESSION_LIMIT));
        assert!(!can_schedule_session(3, DEFAULT_SESSION_LIMIT));
        assert!(can_schedule_session(4, 5));
    }

    #[test]
    fn mentor_score_caps_session_credit() {
        assert_eq!(calculate_mentor_score(4.5, 12), 57.0);
        assert_eq!(calculate_mentor_score(4.0, 20), 60.0);
        assert_eq!(calculate_mentor_score(4.0, 150), 60.0);
    }

    #[test]
    fn feedback_only_after_completion() {
        assert!(is_feedback_required(SessionStatus::Completed));
        assert!(!is_feedback_required(SessionStatus::Confirmed));
        assert!(!is_feedback_required(SessionStatus::Pending));
    }

    #[test]
    fn validates_session_times() {
        assert!(is_valid_session_time("2025-11-03T14:00"));
        assert!(is_valid_session_time("2025-11-03T14:00:00Z"));
        assert!(!is_valid_session_time("tomorrow afternoon"));
    }

    #[test]
    fn topics_are_collapsed_and_trimmed() {
        assert_eq!(format_session_topic("  Career   prep "), "Career prep");
        assert_eq!(format_session_topic("CV\n\treview"), "CV review");
        assert_eq!(format_session_topic("   "), "");
    }
}
