pub mod aid;
pub mod career;
pub mod mentorship;
pub mod notifications;
pub mod wellness;
