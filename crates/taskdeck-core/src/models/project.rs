use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::invitation::ProjectRole;

/// Task as embedded in a project response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TaskSummary {
    #[serde(rename = "idGuid")]
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "id_tarea_status")]
    pub status_id: Option<i64>,
    #[serde(rename = "id_prioridad")]
    pub priority_id: Option<i64>,
    #[serde(rename = "project_id")]
    pub project_id: Option<String>,
    #[serde(rename = "listTag", default)]
    #[cfg_attr(feature = "ts", ts(type = "Array<unknown> | null"))]
    pub tags: Option<Vec<serde_json::Value>>,
    #[serde(rename = "fechaLimite", default)]
    pub due_date: Option<String>,
    /// Record status (1 = active)
    #[serde(default)]
    pub status: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Project {
    #[serde(rename = "idGuid")]
    pub id: String,
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "ownerId")]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(rename = "listTask", default)]
    pub tasks: Option<Vec<TaskSummary>>,
}

impl Project {
    pub fn task_count(&self) -> usize {
        self.tasks.as_ref().map(|t| t.len()).unwrap_or(0)
    }
}

/// Response of `GET /projects`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ProjectList {
    #[serde(default)]
    pub owned: Vec<Project>,
    #[serde(default)]
    pub collaborations: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewProject {
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    pub status: i64,
}

/// Partial project update; absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

/// A user with access to a project.
///
/// The members endpoint is loosely typed; anything beyond the known fields
/// is kept in `extra`. The user id comes from `userId` or `usuarioId`, and
/// only from `id` when neither is present, since a membership record may
/// carry an `id` of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(try_from = "MemberRecord")]
pub struct ProjectMember {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<ProjectRole>,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(skip))]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct MemberRecord {
    #[serde(rename = "userId", alias = "usuarioId", default)]
    user_id: Option<i64>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<ProjectRole>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<MemberRecord> for ProjectMember {
    type Error = String;

    fn try_from(record: MemberRecord) -> Result<Self, Self::Error> {
        let user_id = record
            .user_id
            .or_else(|| record.extra.get("id").and_then(|v| v.as_i64()))
            .ok_or_else(|| "member has no user id".to_string())?;
        Ok(Self {
            user_id,
            username: record.username,
            email: record.email,
            role: record.role,
            extra: record.extra,
        })
    }
}

impl ProjectMember {
    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("user #{}", self.user_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MemberUpdate {
    pub role: ProjectRole,
}
