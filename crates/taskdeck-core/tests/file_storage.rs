//! The file-backed credential slot across restarts.

mod common;

use std::sync::Arc;

use common::{expired_token, valid_token};
use taskdeck_core::auth::{CredentialStore, FileStore, KeyValueStore, SessionState, TOKEN_KEY};

#[test]
fn test_credential_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let token = valid_token();

    FileStore::new(dir.path().to_path_buf()).set(TOKEN_KEY, &token).unwrap();

    let store = CredentialStore::load(Arc::new(FileStore::new(dir.path().to_path_buf())));
    assert_eq!(store.state(), SessionState::Valid);
    assert!(store.expires_at().is_some());

    store.logout();
    let reopened = CredentialStore::load(Arc::new(FileStore::new(dir.path().to_path_buf())));
    assert_eq!(reopened.state(), SessionState::Unauthenticated);
}

#[test]
fn test_expired_credential_removed_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStore::new(dir.path().to_path_buf()));
    storage.set(TOKEN_KEY, &expired_token()).unwrap();

    let store = CredentialStore::load(storage.clone());
    assert_eq!(store.state(), SessionState::Expired);

    store.check_auth();
    assert_eq!(store.state(), SessionState::Unauthenticated);
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    assert!(!storage.path().exists());
}
