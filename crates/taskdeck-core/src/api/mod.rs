//! REST API client module.
//!
//! This module provides the `ApiClient` for talking to the taskdeck API:
//! authentication, dashboard, projects, tasks, invitations and the user.
//!
//! The API uses JWT bearer token authentication obtained from
//! `POST /auth/login`.

pub mod client;
pub mod error;

pub use client::{ApiClient, LoginResponse, DEFAULT_BASE_URL};
pub use error::{ApiError, ErrorBody};
