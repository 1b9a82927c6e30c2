//! In-memory domain stores.
//!
//! Each store caches one slice of the API for the current session. Loads
//! and mutations catch their own failures, keep a user-facing message in
//! `error` and reset their loading flag; nothing is retried. Invitation
//! send and confirm additionally hand the error back to the caller.

pub mod dashboard;
pub mod invitations;
pub mod projects;
pub mod tasks;
pub mod user;

use tracing::error;

use crate::api::ApiError;

pub use dashboard::DashboardStore;
pub use invitations::{InvitationsStore, INVITATION_ACCEPTED, INVITATION_REJECTED};
pub use projects::ProjectsStore;
pub use tasks::TasksStore;
pub use user::UserStore;

/// Placeholder label for catalog ids that are unknown or missing
pub const UNKNOWN_LABEL: &str = "—";

/// Log a store failure and pick the message to show for it.
pub(crate) fn failure_message(operation: &str, err: &ApiError, fallback: &str) -> String {
    error!(operation = operation, error = %err, "Store operation failed");
    err.user_message(fallback)
}
