//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use serde_json::json;
use taskdeck_core::auth::{KeyValueStore, MemoryStore, TOKEN_KEY};
use taskdeck_core::{AppContext, Config};
use wiremock::MockServer;

/// Path prefix the mock API is mounted under
pub const API_PREFIX: &str = "/ExampleAPI/v1";

/// Unsigned JWT whose `exp` is `offset` from now.
pub fn token_expiring_in(offset: Duration) -> String {
    let exp = (Utc::now() + offset).timestamp();
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(json!({ "sub": "ana", "exp": exp }).to_string());
    format!("{}.{}.sig", header, claims)
}

pub fn valid_token() -> String {
    token_expiring_in(Duration::hours(1))
}

pub fn expired_token() -> String {
    token_expiring_in(Duration::hours(-1))
}

pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Context pointed at `server`, with `token` pre-persisted if given.
pub fn context_for(server: &MockServer, token: Option<&str>) -> (Arc<MemoryStore>, AppContext) {
    let storage = Arc::new(MemoryStore::new());
    if let Some(token) = token {
        storage.set(TOKEN_KEY, token).unwrap();
    }
    let config = Config {
        api_base_url: format!("{}{}", server.uri(), API_PREFIX),
        ..Config::default()
    };
    let context = AppContext::bootstrap(config, storage.clone()).unwrap();
    (storage, context)
}
