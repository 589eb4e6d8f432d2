use super::role::{has_role_access, resolve_dashboard_path, Role};

/// Cookie carrying the signed-in user's role in demo mode.
pub const ROLE_COOKIE: &str = "unicare_role";

pub const LOGIN_PATH: &str = "/login";

const DASHBOARD_ROOT: &str = "/dashboard";

/// Outcome of gating a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
    Redirect(&'static str),
}

impl GateDecision {
    pub fn location(&self) -> Option<&'static str> {
        match self {
            GateDecision::Allow => None,
            GateDecision::RedirectToLogin => Some(LOGIN_PATH),
            GateDecision::Redirect(path) => Some(*path),
        }
    }
}

/// Decide whether a page request may proceed.
///
/// Only `/dashboard` paths are gated. A missing cookie sends the visitor to
/// the login page; a role ranked below the requested dashboard's owner, or a
/// request for the bare dashboard root, is redirected to the role's own
/// dashboard. Unrecognized cookie values resolve like an unknown role.
pub fn gate_dashboard_request(path: &str, role_cookie: Option<&str>) -> GateDecision {
    let Some(rest) = path.strip_prefix(DASHBOARD_ROOT) else {
        return GateDecision::Allow;
    };
    if !(rest.is_empty() || rest.starts_with('/')) {
        return GateDecision::Allow;
    }

    let Some(cookie) = role_cookie.filter(|value| !value.trim().is_empty()) else {
        return GateDecision::RedirectToLogin;
    };

    let own_dashboard = resolve_dashboard_path(Some(cookie));
    let bucket = rest.trim_start_matches('/').split('/').next().unwrap_or("");
    if bucket.is_empty() {
        return GateDecision::Redirect(own_dashboard);
    }

    let Some(owner) = Role::for_dashboard_bucket(bucket) else {
        return GateDecision::Allow;
    };

    let user = cookie.parse::<Role>().unwrap_or(Role::Student);
    if has_role_access(user, owner) {
        GateDecision::Allow
    } else {
        GateDecision::Redirect(own_dashboard)
    }
}

/// Extract the role cookie from a raw `Cookie` header value.
pub fn role_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name.trim() == ROLE_COOKIE).then(|| value.trim())
    })
}
