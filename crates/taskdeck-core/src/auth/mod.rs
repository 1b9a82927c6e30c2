//! Session and credential management.
//!
//! This module provides:
//! - `Credential` / `Claims`: the bearer token and its decoded expiry
//! - `CredentialStore`: the one active credential and its validity checks
//! - `KeyValueStore`: the persistence slot behind it (file, keychain, memory)

pub mod credentials;
pub mod storage;
pub mod token;

pub use credentials::{AuthError, CredentialStore, SessionState, TOKEN_KEY};
pub use storage::{FileStore, KeyValueStore, KeyringStore, MemoryStore, StorageBackend};
pub use token::{decode_claims, Claims, Credential, TokenError};
