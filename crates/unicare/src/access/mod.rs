//! Role resolution and dashboard gating.
//!
//! Roles form a closed set with a rank ordering; every access decision in the
//! platform funnels through [`has_role_access`].

pub mod gate;
pub mod role;
pub mod router;

pub use gate::{gate_dashboard_request, role_from_cookie_header, GateDecision, ROLE_COOKIE};
pub use role::{has_role_access, resolve_dashboard_path, Role, UnknownRole, STUDENT_DASHBOARD};
pub use router::access_router;
