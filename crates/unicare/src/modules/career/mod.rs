//! Scholarship and job matching, deadline tracking and skill-gap analysis.

pub mod catalogue;
pub mod domain;
pub mod matching;
pub mod router;

pub use catalogue::{CatalogueError, DemoCatalogue};
pub use domain::{CareerDeadline, JobListing, Scholarship};
pub use matching::{calculate_skill_gap, filter_jobs, match_scholarships, upcoming_deadlines};
pub use router::career_router;
