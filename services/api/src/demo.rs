use crate::infra::{InMemoryNotificationStore, InMemorySessionRepository};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use unicare::access::{gate_dashboard_request, has_role_access, resolve_dashboard_path, Role};
use unicare::datetime::parse_instant;
use unicare::error::AppError;
use unicare::modules::aid::{
    calculate_aid_score, is_eligible_for_emergency_aid, normalize_amount, payment_plan_months,
    AidScoreInput, IncomeLevel,
};
use unicare::modules::career::{
    calculate_skill_gap, filter_jobs, match_scholarships, upcoming_deadlines, DemoCatalogue,
};
use unicare::modules::mentorship::{
    calculate_mentor_score, MentorshipService, SessionRequest, DEFAULT_SESSION_LIMIT,
};
use unicare::modules::wellness::{assess_check_in, WellnessCheckIn};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Role used for the dashboard walkthrough (defaults to student).
    #[arg(long)]
    pub(crate) role: Option<String>,
    /// Reference time for deadline filtering (defaults to now).
    #[arg(long, value_parser = parse_reference_time)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Optional scholarship CSV export (id,name,tags,deadline).
    #[arg(long)]
    pub(crate) catalogue: Option<PathBuf>,
    /// Skip the mentorship booking portion of the demo.
    #[arg(long)]
    pub(crate) skip_mentorship: bool,
}

fn parse_reference_time(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(raw).ok_or_else(|| format!("failed to parse '{raw}' as a date or date/time"))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        role,
        now,
        catalogue,
        skip_mentorship,
    } = args;

    let now = now.unwrap_or_else(Utc::now);
    let catalogue = match catalogue {
        Some(path) => DemoCatalogue::standard().with_scholarships_from_path(path)?,
        None => DemoCatalogue::standard(),
    };

    println!("UniCare Connect demo");
    render_access(role.as_deref());
    render_aid()?;
    render_wellness();
    render_career(&catalogue, now);

    if skip_mentorship {
        return Ok(());
    }
    render_mentorship(now);

    Ok(())
}

fn render_access(role: Option<&str>) {
    println!("\nAccess");
    let dashboard = resolve_dashboard_path(role);
    match role.map(str::parse::<Role>) {
        Some(Ok(parsed)) => println!("- Role {parsed} lands on {dashboard}"),
        Some(Err(err)) => println!("- {err}; falling back to {dashboard}"),
        None => println!("- No role supplied; falling back to {dashboard}"),
    }

    let user = role
        .and_then(|value| value.parse::<Role>().ok())
        .unwrap_or(Role::Student);
    for required in [Role::Student, Role::Mentor, Role::Admin, Role::SuperAdmin] {
        println!(
            "  - requires {required}: {}",
            if has_role_access(user, required) {
                "allowed"
            } else {
                "denied"
            }
        );
    }
    let decision = gate_dashboard_request("/dashboard/admin", Some(user.label()));
    println!("- Visiting /dashboard/admin as {user}: {decision:?}");
}

fn render_aid() -> Result<(), AppError> {
    println!("\nFinancial aid");
    let applicants = [
        ("Low income, urgent, two dependents", IncomeLevel::Low, 8, 2),
        ("Medium income, moderate urgency", IncomeLevel::Medium, 4, 1),
        ("High income, low urgency", IncomeLevel::High, 1, 0),
    ];
    for (label, income_level, urgency, dependents) in applicants {
        let score = calculate_aid_score(&AidScoreInput {
            income_level,
            urgency,
            dependents,
        });
        println!(
            "- {label}: score {score} ({})",
            if is_eligible_for_emergency_aid(score) {
                "eligible for emergency aid"
            } else {
                "not eligible for emergency aid"
            }
        );
    }

    for raw in ["LKR 45,000", "LKR 120,000", "LKR 300,000.00"] {
        let amount = normalize_amount(raw)?;
        println!(
            "- Requested {raw} -> {amount:.0} over {} months",
            payment_plan_months(amount)
        );
    }
    Ok(())
}

fn render_wellness() {
    println!("\nWellness check-ins");
    let check_ins = [
        (8, 5.0, Some("anxious")),
        (5, 7.0, Some("tired")),
        (2, 8.5, None),
    ];
    for (stress_level, sleep_hours, mood) in check_ins {
        let assessment = assess_check_in(&WellnessCheckIn {
            stress_level,
            sleep_hours,
            mood: mood.map(str::to_string),
        });
        println!(
            "- stress {stress_level}, sleep {sleep_hours:.1}h -> score {} | {}",
            assessment.score, assessment.message
        );
        if assessment.high_risk_mood {
            println!("  high-risk mood reported; counselor follow-up suggested");
        }
        if assessment.suggest_challenge {
            println!("  suggest a wellness challenge");
        }
    }
}

fn render_career(catalogue: &DemoCatalogue, now: DateTime<Utc>) {
    println!("\nCareer");
    let tags = ["STEM", "need-based"];
    let matched = match_scholarships(&catalogue.scholarships, &tags);
    println!("- Scholarships matching {:?}: {}", tags, matched.len());
    for scholarship in matched {
        println!("  - {}", scholarship.name);
    }

    let jobs = filter_jobs(&catalogue.jobs, "developer");
    println!("- Jobs mentioning 'developer': {}", jobs.len());
    for job in jobs {
        println!("  - {} at {}", job.title, job.company);
    }

    let deadlines = catalogue.deadlines();
    let upcoming = upcoming_deadlines(&deadlines, now);
    println!("- Upcoming deadlines after {}", now.format("%Y-%m-%d %H:%M UTC"));
    for item in upcoming {
        println!("  - {} ({})", item.label, item.deadline);
    }

    let gap = calculate_skill_gap(&["React", "Git"], &["React", "Node", "SQL", "Git"]);
    println!("- Skill gap for a full-stack role: {}", gap.join(", "));
}

fn render_mentorship(now: DateTime<Utc>) {
    println!("\nMentorship");
    let notifications = Arc::new(InMemoryNotificationStore::default());
    let service = MentorshipService::new(
        Arc::new(InMemorySessionRepository::default()),
        notifications.clone(),
        DEFAULT_SESSION_LIMIT,
    );

    let topics = ["  Career   prep ", "CV review", "Mock interview", "Networking"];
    let mut first_session = None;
    for (offset, topic) in (1i64..).zip(topics) {
        let request = SessionRequest {
            student_id: "stu-demo".to_string(),
            mentor_id: "mentor-demo".to_string(),
            topic: topic.to_string(),
            scheduled_at: (now + Duration::days(offset)).to_rfc3339(),
        };
        match service.schedule(request) {
            Ok(session) => {
                println!("- Booked '{}' ({})", session.topic, session.id.0);
                first_session.get_or_insert(session.id);
            }
            Err(err) => println!("- Booking '{}' rejected: {err}", topic.trim()),
        }
    }

    if let Some(id) = first_session {
        match service.complete(&id) {
            Ok(outcome) => println!(
                "- Completed {} | feedback required: {}",
                outcome.session.id.0, outcome.feedback_required
            ),
            Err(err) => println!("- Completion failed: {err}"),
        }
    }

    println!(
        "- Mentor score (rating 4.6, 27 sessions): {:.1}",
        calculate_mentor_score(4.6, 27)
    );

    let events = notifications.events();
    if events.is_empty() {
        println!("- Notifications: none dispatched");
    } else {
        println!("- Notifications");
        for event in events {
            println!("  - [{:?}] {} -> {}", event.kind, event.recipient, event.message);
        }
    }
}
