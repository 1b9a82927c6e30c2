use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};

use super::storage::KeyValueStore;
use super::token::Credential;

/// Persistence slot holding the bearer token
pub const TOKEN_KEY: &str = "jwt";

/// Shown when the API rejects a login without saying why
const DEFAULT_LOGIN_ERROR: &str = "Unable to sign in";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("Login response did not include a token")]
    MissingToken,
}

/// Where the session stands at the instant of the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Valid,
    Expired,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Unauthenticated => write!(f, "signed out"),
            SessionState::Valid => write!(f, "signed in"),
            SessionState::Expired => write!(f, "expired"),
        }
    }
}

/// Owns the one active credential.
///
/// Validity is never cached: every query decodes the token against the
/// current time. The HTTP client and the navigation guard hold an
/// `Arc<CredentialStore>` and go through `logout` when they need the
/// credential gone.
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStore>,
    token: RwLock<Option<Credential>>,
    last_error: RwLock<Option<String>>,
    loading: AtomicBool,
}

impl CredentialStore {
    /// Build the store, reading the persisted slot once.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let token = match storage.get(TOKEN_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => Some(Credential::new(raw)),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted credential, starting signed out");
                None
            }
        };
        debug!(has_token = token.is_some(), "Credential store loaded");

        Self {
            storage,
            token: RwLock::new(token),
            last_error: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    pub fn token(&self) -> Option<Credential> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// True when there is no credential, it cannot be decoded, or its
    /// expiry is not in the future.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.token() {
            Some(credential) => credential.is_expired_at(now),
            None => true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_authenticated() && !self.is_expired()
    }

    pub fn state(&self) -> SessionState {
        match self.token() {
            None => SessionState::Unauthenticated,
            Some(credential) if credential.is_expired() => SessionState::Expired,
            Some(_) => SessionState::Valid,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.token().and_then(|c| c.expires_at())
    }

    /// Message from the last failed login, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Exchange an identifier and secret for a token.
    ///
    /// On failure the previous credential, in memory and persisted, is left
    /// as it was.
    pub async fn login(&self, api: &ApiClient, identifier: &str, secret: &str) -> Result<(), AuthError> {
        self.loading.store(true, Ordering::SeqCst);
        self.set_error(None);

        let result = match api.login(identifier, secret).await {
            Ok(response) => match response.jwt.filter(|t| !t.is_empty()) {
                Some(token) => {
                    self.store(Credential::new(token));
                    info!("Login successful");
                    Ok(())
                }
                None => {
                    warn!("Login response had no token");
                    self.set_error(Some(DEFAULT_LOGIN_ERROR.to_string()));
                    Err(AuthError::MissingToken)
                }
            },
            Err(e) => {
                warn!(error = %e, "Login failed");
                let message = e.user_message(DEFAULT_LOGIN_ERROR);
                self.set_error(Some(message.clone()));
                Err(AuthError::Rejected { message, source: e })
            }
        };

        self.loading.store(false, Ordering::SeqCst);
        result
    }

    /// Drop the credential from memory and from the persistence slot.
    pub fn logout(&self) {
        let had_token = self
            .token
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .is_some();

        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to clear persisted credential");
        }

        if had_token {
            info!("Signed out");
        }
    }

    /// Reconcile a persisted credential with the clock. Call at startup.
    pub fn check_auth(&self) {
        if self.is_authenticated() && self.is_expired() {
            debug!("Persisted credential has expired");
            self.logout();
        }
    }

    fn store(&self, credential: Credential) {
        if let Err(e) = self.storage.set(TOKEN_KEY, credential.as_str()) {
            warn!(error = %e, "Failed to persist credential, keeping it for this run only");
        }
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(credential);
    }

    fn set_error(&self, message: Option<String>) {
        *self.last_error.write().unwrap_or_else(|e| e.into_inner()) = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::storage::MemoryStore;
    use crate::auth::token::test_tokens;

    fn store_with(token: Option<&str>) -> (Arc<MemoryStore>, CredentialStore) {
        let storage = Arc::new(MemoryStore::new());
        if let Some(token) = token {
            storage.set(TOKEN_KEY, token).unwrap();
        }
        let store = CredentialStore::load(storage.clone());
        (storage, store)
    }

    #[test]
    fn test_load_reads_persisted_slot() {
        let token = test_tokens::valid();
        let (_, store) = store_with(Some(&token));
        assert!(store.is_authenticated());
        assert!(!store.is_expired());
        assert_eq!(store.state(), SessionState::Valid);
        assert_eq!(store.token().unwrap().as_str(), token);
    }

    #[test]
    fn test_empty_store_is_expired_and_unauthenticated() {
        let (_, store) = store_with(None);
        assert!(!store.is_authenticated());
        assert!(store.is_expired());
        assert!(!store.is_valid());
        assert_eq!(store.state(), SessionState::Unauthenticated);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (storage, store) = store_with(Some(&test_tokens::valid()));
        store.logout();
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);

        store.logout();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_check_auth_clears_expired_token() {
        let (storage, store) = store_with(Some(&test_tokens::expired()));
        assert!(store.is_authenticated());
        assert_eq!(store.state(), SessionState::Expired);

        store.check_auth();
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_check_auth_keeps_valid_token() {
        let (storage, store) = store_with(Some(&test_tokens::valid()));
        store.check_auth();
        assert!(store.is_valid());
        assert!(storage.get(TOKEN_KEY).unwrap().is_some());
    }

    #[test]
    fn test_garbage_token_counts_as_expired() {
        let (_, store) = store_with(Some("not-a-jwt"));
        assert!(store.is_authenticated());
        assert!(store.is_expired());
        assert_eq!(store.expires_at(), None);
        store.check_auth();
        assert!(!store.is_authenticated());
    }
}
