use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const STUDENT_DASHBOARD: &str = "/dashboard/student";

/// Platform roles. Each maps to exactly one rank and one dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Parent,
    Mentor,
    Donor,
    Employer,
    Ngo,
    Admin,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Student,
        Role::Parent,
        Role::Mentor,
        Role::Donor,
        Role::Employer,
        Role::Ngo,
        Role::Admin,
        Role::SuperAdmin,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Parent => "parent",
            Role::Mentor => "mentor",
            Role::Donor => "donor",
            Role::Employer => "employer",
            Role::Ngo => "ngo",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Access rank. Roles sharing a rank satisfy each other's requirements.
    pub const fn priority(self) -> u8 {
        match self {
            Role::Student | Role::Parent => 1,
            Role::Mentor | Role::Donor | Role::Employer | Role::Ngo => 2,
            Role::Admin => 3,
            Role::SuperAdmin => 4,
        }
    }

    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Role::Student => STUDENT_DASHBOARD,
            Role::Parent => "/dashboard/parent",
            Role::Mentor => "/dashboard/mentor",
            Role::Donor => "/dashboard/donor",
            Role::Employer => "/dashboard/employer",
            Role::Ngo => "/dashboard/ngo",
            Role::Admin | Role::SuperAdmin => "/dashboard/admin",
        }
    }

    /// Role owning a dashboard bucket (`admin` resolves to [`Role::Admin`]).
    pub fn for_dashboard_bucket(bucket: &str) -> Option<Role> {
        match bucket {
            "admin" => Some(Role::Admin),
            other => Role::ALL
                .into_iter()
                .find(|role| *role != Role::SuperAdmin && role.label() == other),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Role::ALL
            .into_iter()
            .find(|role| role.label() == normalized)
            .ok_or_else(|| UnknownRole(value.to_string()))
    }
}

/// Dashboard for an untrusted role string; anything unrecognized lands on the
/// student dashboard.
pub fn resolve_dashboard_path(role: Option<&str>) -> &'static str {
    role.and_then(|value| value.parse::<Role>().ok())
        .map(Role::dashboard_path)
        .unwrap_or(STUDENT_DASHBOARD)
}

pub fn has_role_access(user: Role, required: Role) -> bool {
    user.priority() >= required.priority()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_resolves_to_a_dashboard() {
        for role in Role::ALL {
            let path = resolve_dashboard_path(Some(role.label()));
            assert!(path.starts_with("/dashboard/"), "{role} -> {path}");
            assert_eq!(path, role.dashboard_path());
        }
    }

    #[test]
    fn admins_share_a_dashboard() {
        assert_eq!(Role::Admin.dashboard_path(), "/dashboard/admin");
        assert_eq!(Role::SuperAdmin.dashboard_path(), "/dashboard/admin");
    }

    #[test]
    fn unknown_or_missing_role_defaults_to_student() {
        assert_eq!(resolve_dashboard_path(None), STUDENT_DASHBOARD);
        assert_eq!(resolve_dashboard_path(Some("janitor")), STUDENT_DASHBOARD);
        assert_eq!(resolve_dashboard_path(Some("")), STUDENT_DASHBOARD);
    }

    #[test]
    fn parsing_normalizes_case_and_separators() {
        assert_eq!(" Mentor ".parse::<Role>(), Ok(Role::Mentor));
        assert_eq!("super-admin".parse::<Role>(), Ok(Role::SuperAdmin));
        assert_eq!(
            "professor".parse::<Role>(),
            Err(UnknownRole("professor".to_string()))
        );
    }

    #[test]
    fn access_is_reflexive() {
        for role in Role::ALL {
            assert!(has_role_access(role, role), "{role} should access itself");
        }
    }

    #[test]
    fn access_follows_rank_not_role() {
        assert!(has_role_access(Role::Donor, Role::Mentor));
        assert!(has_role_access(Role::Parent, Role::Student));
        assert!(has_role_access(Role::SuperAdmin, Role::Admin));
        assert!(!has_role_access(Role::Admin, Role::SuperAdmin));
        assert!(!has_role_access(Role::Student, Role::Employer));
    }

    #[test]
    fn dashboard_buckets_map_back_to_roles() {
        assert_eq!(Role::for_dashboard_bucket("admin"), Some(Role::Admin));
        assert_eq!(Role::for_dashboard_bucket("ngo"), Some(Role::Ngo));
        assert_eq!(Role::for_dashboard_bucket("super_admin"), None);
        assert_eq!(Role::for_dashboard_bucket("reports"), None);
    }
}
