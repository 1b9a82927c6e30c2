use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectRole {
    Owner,
    Editor,
    Viewer,
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectRole::Owner => write!(f, "OWNER"),
            ProjectRole::Editor => write!(f, "EDITOR"),
            ProjectRole::Viewer => write!(f, "VIEWER"),
        }
    }
}

impl std::str::FromStr for ProjectRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OWNER" => Ok(ProjectRole::Owner),
            "EDITOR" => Ok(ProjectRole::Editor),
            "VIEWER" => Ok(ProjectRole::Viewer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Invitation as listed for the invited user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct InvitationView {
    pub id: String,
    #[serde(rename = "usernameHost")]
    pub host_username: String,
    #[serde(rename = "usernameGuest")]
    pub guest_username: String,
    /// Project name
    pub project: String,
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub role: ProjectRole,
    #[serde(rename = "fechaCreacion")]
    pub created_at: String,
}

/// Body of `POST /invitations`. The host is the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewInvitation {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "userGuestId")]
    pub guest_user_id: i64,
    pub role: ProjectRole,
}

/// Filters and paging for `GET /invitations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationQuery {
    pub status: String,
    pub page: u32,
    pub page_size: u32,
    pub sorts: String,
}

impl Default for InvitationQuery {
    fn default() -> Self {
        Self {
            status: InvitationQuery::PENDING.to_string(),
            page: 0,
            page_size: 5,
            sorts: "fecha_creacion,desc;".to_string(),
        }
    }
}

impl InvitationQuery {
    /// Status filter for invitations awaiting an answer
    pub const PENDING: &'static str = "PENDIENTE";

    pub fn pending() -> Self {
        Self::default()
    }

    /// Query parameters in the API's naming.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("status", self.status.clone()),
            ("pagina", self.page.to_string()),
            ("tamanio", self.page_size.to_string()),
            ("sorts", self.sorts.clone()),
        ]
    }
}
