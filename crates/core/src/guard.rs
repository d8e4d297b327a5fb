//! Access guard for protected views.

use std::fmt;

/// Notice shown when an authenticated user lacks the admin role.
pub const ACCESS_DENIED_NOTICE: &str =
    "You do not have permission to access this page. Only administrators can use the admin panel.";

/// Session flags the guard decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Access {
    /// A user and a token are present.
    pub is_authenticated: bool,

    /// The user holds the admin role.
    pub is_admin: bool,

    /// The session is still being restored or a login is in flight.
    pub loading: bool,
}

/// What a protected view requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any logged in user.
    Authenticated,

    /// A logged in admin.
    Admin,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The session is still loading; show a waiting indicator.
    Pending,

    /// Not logged in; send the user to login and come back to `from` afterwards.
    RedirectToLogin {
        /// Originally requested location.
        from: String,
    },

    /// Logged in but not allowed; show the notice, do not redirect.
    Deny {
        /// Access denied notice.
        notice: &'static str,
    },

    /// Render the protected view.
    Allow,
}

impl Decision {
    /// Whether the protected view may render.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("session is still loading"),
            Self::RedirectToLogin { from } => write!(f, "login required to access {from}"),
            Self::Deny { notice } => f.write_str(notice),
            Self::Allow => f.write_str("access allowed"),
        }
    }
}

/// Decide whether a view at `location` with `requirement` may render.
pub fn decide(access: Access, requirement: Requirement, location: &str) -> Decision {
    if access.loading {
        return Decision::Pending;
    }

    if !access.is_authenticated {
        return Decision::RedirectToLogin {
            from: location.to_string(),
        };
    }

    match requirement {
        Requirement::Admin if !access.is_admin => Decision::Deny {
            notice: ACCESS_DENIED_NOTICE,
        },
        Requirement::Admin | Requirement::Authenticated => Decision::Allow,
    }
}
