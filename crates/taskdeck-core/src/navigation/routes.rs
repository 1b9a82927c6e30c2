use std::fmt;

use super::NavigationError;

/// Every screen the client can be on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Projects,
    ProjectDetail { project_id: String },
    Invitations,
}

impl Route {
    /// Route name, stable across path changes.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::Dashboard => "dashboard",
            Route::Projects => "projects",
            Route::ProjectDetail { .. } => "project-detail",
            Route::Invitations => "invitations",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectDetail { project_id } => format!("/projects/{}", project_id),
            Route::Invitations => "/invitations".to_string(),
        }
    }

    /// Reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }

    pub fn requires_auth(&self) -> bool {
        !self.is_public()
    }

    /// Resolve a path like `/projects/abc` to its route.
    ///
    /// Query strings and a trailing slash are ignored.
    pub fn parse(path: &str) -> Result<Self, NavigationError> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Route::Dashboard),
            ["login"] => Ok(Route::Login),
            ["projects"] => Ok(Route::Projects),
            ["projects", id] => Ok(Route::ProjectDetail {
                project_id: (*id).to_string(),
            }),
            ["invitations"] => Ok(Route::Invitations),
            _ => Err(NavigationError::UnknownPath(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// One navigation attempt, evaluated once by the guard and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub target: Route,
    pub requires_auth: bool,
    pub is_public: bool,
}

impl NavigationIntent {
    pub fn to(target: Route) -> Self {
        Self {
            requires_auth: target.requires_auth(),
            is_public: target.is_public(),
            target,
        }
    }
}
