use std::sync::Arc;

use tracing::debug;

use crate::auth::CredentialStore;

use super::routes::{NavigationIntent, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
}

/// Decides every navigation from the credential as it is right now.
///
/// Three session states drive it: no credential, a valid one, and an
/// expired one. Time moves a session from valid to expired; the guard is
/// where that transition gets noticed and the credential cleared.
#[derive(Clone)]
pub struct Guard {
    credentials: Arc<CredentialStore>,
}

impl Guard {
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self { credentials }
    }

    pub fn check(&self, intent: &NavigationIntent) -> GuardDecision {
        // Expired: clear before deciding.
        if self.credentials.is_authenticated() && self.credentials.is_expired() {
            debug!(target_route = intent.target.name(), "Session expired during navigation");
            self.credentials.logout();
            return GuardDecision::Redirect(Route::Login);
        }

        if intent.is_public {
            if intent.target == Route::Login && self.credentials.is_valid() {
                return GuardDecision::Redirect(Route::Dashboard);
            }
            return GuardDecision::Allow;
        }

        if self.credentials.is_valid() {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect(Route::Login)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::test_tokens;
    use crate::auth::{KeyValueStore, MemoryStore, TOKEN_KEY};

    fn guard_with(token: Option<String>) -> (Arc<CredentialStore>, Guard) {
        let storage = Arc::new(MemoryStore::new());
        if let Some(token) = token {
            storage.set(TOKEN_KEY, &token).unwrap();
        }
        let credentials = Arc::new(CredentialStore::load(storage));
        let guard = Guard::new(credentials.clone());
        (credentials, guard)
    }

    fn private_routes() -> Vec<Route> {
        vec![
            Route::Dashboard,
            Route::Projects,
            Route::ProjectDetail {
                project_id: "p-1".to_string(),
            },
            Route::Invitations,
        ]
    }

    #[test]
    fn test_private_routes_need_valid_session() {
        let (_, signed_out) = guard_with(None);
        let (_, signed_in) = guard_with(Some(test_tokens::valid()));

        for route in private_routes() {
            let intent = NavigationIntent::to(route);
            assert_eq!(signed_out.check(&intent), GuardDecision::Redirect(Route::Login));
            assert_eq!(signed_in.check(&intent), GuardDecision::Allow);
        }
    }

    #[test]
    fn test_login_redirects_when_signed_in() {
        let (_, guard) = guard_with(Some(test_tokens::valid()));
        assert_eq!(
            guard.check(&NavigationIntent::to(Route::Login)),
            GuardDecision::Redirect(Route::Dashboard)
        );

        let (_, guard) = guard_with(None);
        assert_eq!(guard.check(&NavigationIntent::to(Route::Login)), GuardDecision::Allow);
    }

    #[test]
    fn test_expired_session_cleared_on_any_navigation() {
        let (credentials, guard) = guard_with(Some(test_tokens::expired()));
        assert_eq!(
            guard.check(&NavigationIntent::to(Route::Projects)),
            GuardDecision::Redirect(Route::Login)
        );
        assert!(!credentials.is_authenticated());

        let (credentials, guard) = guard_with(Some(test_tokens::expired()));
        assert_eq!(
            guard.check(&NavigationIntent::to(Route::Login)),
            GuardDecision::Redirect(Route::Login)
        );
        assert!(!credentials.is_authenticated());
        // Second attempt sees no credential and lets login through.
        assert_eq!(guard.check(&NavigationIntent::to(Route::Login)), GuardDecision::Allow);
    }

    #[test]
    fn test_decision_follows_logout_immediately() {
        let (credentials, guard) = guard_with(Some(test_tokens::valid()));
        let intent = NavigationIntent::to(Route::Invitations);
        assert_eq!(guard.check(&intent), GuardDecision::Allow);

        credentials.logout();
        assert_eq!(guard.check(&intent), GuardDecision::Redirect(Route::Login));
    }
}
