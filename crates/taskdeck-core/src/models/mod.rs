//! Data models for the taskdeck API.
//!
//! Field names follow the API's JSON; Rust names are English with
//! `serde(rename)` where the two differ.
//!
//! - `DashboardSummary`: per-user counters for the dashboard
//! - `Project`, `TaskSummary`, `ProjectMember`: projects and their contents
//! - `TaskPriority`, `TaskStatus`, `NewTask`: task catalogs and creation
//! - `InvitationView`, `NewInvitation`, `ProjectRole`: invitation workflow
//! - `UserProfile`, `UserSummary`: the signed-in user and search results
//! - `Page`, `PageMeta`: paginated list envelope

pub mod dashboard;
pub mod invitation;
pub mod page;
pub mod project;
pub mod task;
pub mod user;

pub use dashboard::DashboardSummary;
pub use invitation::{InvitationQuery, InvitationView, NewInvitation, ProjectRole};
pub use page::{Page, PageMeta};
pub use project::{MemberUpdate, NewProject, Project, ProjectList, ProjectMember, ProjectUpdate, TaskSummary};
pub use task::{NewTask, TaskCreated, TaskPriority, TaskStatus};
pub use user::{UserProfile, UserSummary};
