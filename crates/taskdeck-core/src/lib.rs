//! Core library for taskdeck.
//!
//! A client for a project and task management API: it keeps the session
//! credential, guards navigation on it, talks to the REST API and caches
//! what it fetched in per-domain stores.

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod models;
pub mod navigation;
pub mod stores;

pub use config::Config;
pub use context::AppContext;
