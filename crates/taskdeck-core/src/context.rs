//! Wiring for one client session.
//!
//! `AppContext` owns the credential store, the router, the API client and
//! every domain store. There are no globals: anything that needs the
//! credential gets the same `Arc<CredentialStore>`.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::auth::{AuthError, CredentialStore, KeyValueStore};
use crate::config::Config;
use crate::navigation::{Guard, Navigation, NavigationError, Route, Router};
use crate::stores::{DashboardStore, InvitationsStore, ProjectsStore, TasksStore, UserStore};

pub struct AppContext {
    pub config: Config,
    pub credentials: Arc<CredentialStore>,
    pub router: Arc<Router>,
    pub api: ApiClient,
    pub dashboard: DashboardStore,
    pub projects: ProjectsStore,
    pub tasks: TasksStore,
    pub invitations: InvitationsStore,
    pub user: UserStore,
}

impl AppContext {
    /// Build the context on `storage` and drop a persisted credential that
    /// has already expired.
    pub fn bootstrap(config: Config, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let credentials = Arc::new(CredentialStore::load(storage));
        credentials.check_auth();

        let router = Arc::new(Router::new(Guard::new(credentials.clone())));
        let api = ApiClient::new(
            &config.api_base_url,
            config.timeout(),
            credentials.clone(),
            router.clone(),
        )
        .context("Failed to build HTTP client")?;

        info!(base_url = %api.base_url(), session = %credentials.state(), "Client ready");

        Ok(Self {
            dashboard: DashboardStore::new(api.clone()),
            projects: ProjectsStore::new(api.clone()),
            tasks: TasksStore::new(api.clone()),
            invitations: InvitationsStore::new(api.clone()),
            user: UserStore::new(api.clone()),
            config,
            credentials,
            router,
            api,
        })
    }

    /// Sign in and land on the dashboard.
    pub async fn login(&mut self, identifier: &str, secret: &str) -> Result<(), AuthError> {
        self.credentials.login(&self.api, identifier, secret).await?;
        self.config.last_identifier = Some(identifier.to_string());
        if let Err(e) = self.router.push(Route::Dashboard) {
            warn!(error = %e, "Failed to navigate after login");
        }
        Ok(())
    }

    /// Sign out, forget cached data and go back to login.
    pub fn logout(&mut self) {
        self.credentials.logout();
        self.dashboard.reset();
        self.projects.reset();
        self.tasks.reset();
        self.invitations.reset();
        self.user.reset();
        if let Err(e) = self.router.replace(Route::Login) {
            warn!(error = %e, "Failed to navigate after logout");
        }
    }

    pub fn navigate(&self, route: Route) -> Result<Navigation, NavigationError> {
        self.router.push(route)
    }

    pub fn navigate_path(&self, path: &str) -> Result<Navigation, NavigationError> {
        self.router.push_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::test_tokens;
    use crate::auth::{MemoryStore, SessionState, TOKEN_KEY};

    fn context_with(token: Option<String>) -> (Arc<MemoryStore>, AppContext) {
        let storage = Arc::new(MemoryStore::new());
        if let Some(token) = token {
            storage.set(TOKEN_KEY, &token).unwrap();
        }
        let context = AppContext::bootstrap(Config::default(), storage.clone()).unwrap();
        (storage, context)
    }

    #[test]
    fn test_bootstrap_clears_expired_credential() {
        let (storage, context) = context_with(Some(test_tokens::expired()));
        assert_eq!(context.credentials.state(), SessionState::Unauthenticated);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_bootstrap_keeps_valid_credential() {
        let (_, context) = context_with(Some(test_tokens::valid()));
        assert_eq!(context.credentials.state(), SessionState::Valid);
        assert_eq!(context.navigate(Route::Invitations).unwrap().resolved, Route::Invitations);
    }

    #[test]
    fn test_logout_resets_stores() {
        let (storage, mut context) = context_with(Some(test_tokens::valid()));
        context.projects.error = Some("stale".to_string());
        context.invitations.loading = true;

        context.logout();

        assert!(!context.credentials.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(context.projects.error, None);
        assert!(!context.invitations.loading);
        assert_eq!(context.router.current(), Some(Route::Login));
    }
}
