use std::sync::RwLock;

use tracing::debug;

use super::guard::{Guard, GuardDecision};
use super::routes::{NavigationIntent, Route};
use super::NavigationError;

/// Redirect hops followed before a navigation is abandoned.
/// The guard resolves in at most two hops; anything longer is a cycle.
const MAX_REDIRECTS: usize = 5;

/// Result of a completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: Route,
    pub resolved: Route,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.requested != self.resolved
    }
}

/// Tracks the current route and runs the guard on every change.
pub struct Router {
    guard: Guard,
    current: RwLock<Option<Route>>,
}

impl Router {
    pub fn new(guard: Guard) -> Self {
        Self {
            guard,
            current: RwLock::new(None),
        }
    }

    /// Route the client is on; `None` before the first navigation.
    pub fn current(&self) -> Option<Route> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn push(&self, target: Route) -> Result<Navigation, NavigationError> {
        self.navigate(target)
    }

    pub fn push_path(&self, path: &str) -> Result<Navigation, NavigationError> {
        self.navigate(Route::parse(path)?)
    }

    /// Same guard pass as `push`; used when the current screen must be
    /// abandoned, e.g. after the API rejects the session.
    pub fn replace(&self, target: Route) -> Result<Navigation, NavigationError> {
        self.navigate(target)
    }

    fn navigate(&self, requested: Route) -> Result<Navigation, NavigationError> {
        let mut target = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            match self.guard.check(&NavigationIntent::to(target.clone())) {
                GuardDecision::Allow => {
                    debug!(requested = %requested, resolved = %target, "Navigation allowed");
                    *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(target.clone());
                    return Ok(Navigation {
                        requested,
                        resolved: target,
                    });
                }
                GuardDecision::Redirect(next) => {
                    debug!(from = %target, to = %next, "Navigation redirected");
                    target = next;
                }
            }
        }

        Err(NavigationError::RedirectLoop(requested.path()))
    }
}
