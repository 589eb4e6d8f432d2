use std::sync::{Arc, Barrier};
use std::thread;

use super::common::*;
use crate::modules::mentorship::domain::{SessionId, SessionStatus};
use crate::modules::mentorship::repository::SessionRepository;
use crate::modules::mentorship::{MentorshipError, MentorshipService, DEFAULT_SESSION_LIMIT};
use crate::modules::notifications::NotificationKind;

#[test]
fn schedule_formats_topic_and_notifies_mentor() {
    let (service, _, inbox) = build_service();

    let session = service
        .schedule(request("stu-001", "  Career   prep "))
        .expect("session scheduled");

    assert_eq!(session.topic, "Career prep");
    assert_eq!(session.status, SessionStatus::Pending);
    let events = inbox.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].recipient, "mentor-ayesha");
    assert_eq!(events[0].kind, NotificationKind::SessionScheduled);
}

#[test]
fn schedule_rejects_unparseable_times() {
    let (service, _, inbox) = build_service();
    let mut booking = request("stu-001", "Interview practice");
    booking.scheduled_at = "after lunch".to_string();

    let err = service.schedule(booking).expect_err("time rejected");

    assert!(matches!(err, MentorshipError::InvalidSessionTime(_)));
    assert!(inbox.events().is_empty());
}

#[test]
fn schedule_rejects_blank_topics() {
    let (service, _, _) = build_service();

    let err = service
        .schedule(request("stu-001", " \t "))
        .expect_err("topic rejected");

    assert!(matches!(err, MentorshipError::EmptyTopic));
}

#[test]
fn schedule_enforces_open_session_limit() {
    let (service, _, _) = build_service();
    for topic in ["CV review", "Portfolio", "Networking"] {
        service
            .schedule(request("stu-001", topic))
            .expect("within limit");
    }

    let err = service
        .schedule(request("stu-001", "One more"))
        .expect_err("limit reached");
    assert!(matches!(
        err,
        MentorshipError::SessionLimitReached { limit: 3 }
    ));

    service
        .schedule(request("stu-002", "Different student"))
        .expect("limit is per student");
}

#[test]
fn completed_sessions_free_a_slot() {
    let (service, _, _) = build_service();
    let first = service
        .schedule(request("stu-001", "CV review"))
        .expect("scheduled");
    for topic in ["Portfolio", "Networking"] {
        service.schedule(request("stu-001", topic)).expect("scheduled");
    }

    service.complete(&first.id).expect("completed");

    service
        .schedule(request("stu-001", "Mock interview"))
        .expect("slot freed by completion");
}

#[test]
fn complete_requests_feedback_from_student() {
    let (service, _, inbox) = build_service();
    let session = service
        .schedule(request("stu-001", "CV review"))
        .expect("scheduled");
    service.confirm(&session.id).expect("confirmed");

    let outcome = service.complete(&session.id).expect("completed");

    assert!(outcome.feedback_required);
    assert_eq!(outcome.session.status, SessionStatus::Completed);
    let kinds: Vec<_> = inbox.events().iter().map(|event| event.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::SessionScheduled,
            NotificationKind::SessionConfirmed,
            NotificationKind::FeedbackRequested,
        ]
    );
}

#[test]
fn confirm_does_not_require_feedback() {
    let (service, _, _) = build_service();
    let session = service
        .schedule(request("stu-001", "CV review"))
        .expect("scheduled");

    let outcome = service.confirm(&session.id).expect("confirmed");

    assert!(!outcome.feedback_required);
    assert_eq!(outcome.session.status, SessionStatus::Confirmed);
}

#[test]
fn completed_sessions_cannot_be_reopened() {
    let (service, _, _) = build_service();
    let session = service
        .schedule(request("stu-001", "CV review"))
        .expect("scheduled");
    service.complete(&session.id).expect("completed");

    let err = service.confirm(&session.id).expect_err("transition rejected");

    assert!(matches!(
        err,
        MentorshipError::InvalidTransition {
            from: SessionStatus::Completed,
            to: SessionStatus::Confirmed,
        }
    ));
}

#[test]
fn unknown_sessions_are_not_found() {
    let (service, _, _) = build_service();

    let err = service
        .complete(&SessionId("session-missing".to_string()))
        .expect_err("missing session");

    assert!(matches!(
        err,
        MentorshipError::Repository(crate::modules::mentorship::RepositoryError::NotFound)
    ));
}

#[test]
fn sessions_are_listed_in_schedule_order() {
    let (service, _, _) = build_service();
    let mut later = request("stu-001", "Later");
    later.scheduled_at = "2025-12-01T09:00:00Z".to_string();
    let mut sooner = request("stu-001", "Sooner");
    sooner.scheduled_at = "2025-11-01".to_string();
    service.schedule(later).expect("scheduled");
    service.schedule(sooner).expect("scheduled");

    let sessions = service.sessions_for("stu-001").expect("listed");

    let topics: Vec<_> = sessions.iter().map(|session| session.topic.as_str()).collect();
    assert_eq!(topics, vec!["Sooner", "Later"]);
}

#[test]
fn concurrent_bookings_respect_the_session_limit() {
    let repository = Arc::new(SlowRepository::default());
    let service = Arc::new(MentorshipService::new(
        repository.clone(),
        Arc::new(MemoryInbox::default()),
        DEFAULT_SESSION_LIMIT,
    ));
    let attempts = 8;
    let barrier = Arc::new(Barrier::new(attempts));

    let handles: Vec<_> = (0..attempts)
        .map(|attempt| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service
                    .schedule(request("stu-rush", &format!("Slot {attempt}")))
                    .is_ok()
            })
        })
        .collect();

    let accepted = handles
        .into_iter()
        .map(|handle| handle.join().expect("booking thread"))
        .filter(|accepted| *accepted)
        .count();

    assert_eq!(accepted, DEFAULT_SESSION_LIMIT);
    assert_eq!(
        repository
            .inner
            .for_student("stu-rush")
            .expect("sessions listed")
            .len(),
        DEFAULT_SESSION_LIMIT
    );
}

#[test]
fn failed_delivery_keeps_the_booking_and_its_transitions() {
    let repository = Arc::new(MemoryRepository::default());
    let service = MentorshipService::new(
        repository.clone(),
        Arc::new(OfflineInbox),
        DEFAULT_SESSION_LIMIT,
    );

    let session = service
        .schedule(request("stu-002", "Portfolio review"))
        .expect("booking survives a notification outage");
    assert_eq!(
        repository.for_student("stu-002").expect("sessions listed").len(),
        1
    );

    let confirmed = service.confirm(&session.id).expect("confirm succeeds");
    assert_eq!(confirmed.session.status, SessionStatus::Confirmed);

    let completed = service.complete(&session.id).expect("complete succeeds");
    assert!(completed.feedback_required);
    let stored = repository
        .fetch(&session.id)
        .expect("fetch")
        .expect("session stored");
    assert_eq!(stored.status, SessionStatus::Completed);
}
