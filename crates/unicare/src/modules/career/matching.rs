use chrono::{DateTime, Utc};

use super::domain::{CareerDeadline, JobListing, Scholarship};
use crate::datetime::parse_instant;

/// Scholarships sharing at least one tag with the query, ignoring case.
pub fn match_scholarships<'a, S>(scholarships: &'a [Scholarship], tags: &[S]) -> Vec<&'a Scholarship>
where
    S: AsRef<str>,
{
    let wanted: Vec<String> = tags
        .iter()
        .map(|tag| tag.as_ref().to_lowercase())
        .collect();

    scholarships
        .iter()
        .filter(|scholarship| {
            scholarship
                .tags
                .iter()
                .any(|tag| wanted.contains(&tag.to_lowercase()))
        })
        .collect()
}

/// Jobs whose title contains the keyword, ignoring case.
pub fn filter_jobs<'a>(jobs: &'a [JobListing], keyword: &str) -> Vec<&'a JobListing> {
    let keyword = keyword.to_lowercase();
    jobs.iter()
        .filter(|job| job.title.to_lowercase().contains(&keyword))
        .collect()
}

/// Items due strictly after `now`. Unparseable deadlines never qualify.
pub fn upcoming_deadlines<'a>(
    items: &'a [CareerDeadline],
    now: DateTime<Utc>,
) -> Vec<&'a CareerDeadline> {
    items
        .iter()
        .filter(|item| parse_instant(&item.deadline).is_some_and(|due| due > now))
        .collect()
}

/// Target skills missing from the current set, in target order.
pub fn calculate_skill_gap<C, T>(current: &[C], target: &[T]) -> Vec<String>
where
    C: AsRef<str>,
    T: AsRef<str>,
{
    target
        .iter()
        .map(|skill| skill.as_ref())
        .filter(|skill| !current.iter().any(|have| have.as_ref() == *skill))
        .map(|skill| skill.to_string())
        .collect()
}
