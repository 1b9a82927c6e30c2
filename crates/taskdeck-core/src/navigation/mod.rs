//! In-app navigation.
//!
//! Every route change goes through `Router`, which asks the `Guard` whether
//! the target is reachable with the session as it stands at that instant.

pub mod guard;
pub mod router;
pub mod routes;

use thiserror::Error;

pub use guard::{Guard, GuardDecision};
pub use router::{Navigation, Router};
pub use routes::{NavigationIntent, Route};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No route matches path: {0}")]
    UnknownPath(String),

    #[error("Too many redirects navigating to {0}")]
    RedirectLoop(String),
}
