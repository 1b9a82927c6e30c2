use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::models::{
    MemberUpdate, NewProject, Project, ProjectMember, ProjectUpdate, UserSummary,
};

use super::{failure_message, UNKNOWN_LABEL};

const LOAD_ALL_ERROR: &str = "Could not load projects.";
const LOAD_ONE_ERROR: &str = "Could not load the project.";
const CREATE_ERROR: &str = "Could not create the project.";
const UPDATE_ERROR: &str = "Could not update the project.";
const REMOVE_ERROR: &str = "Could not delete the project.";
const MEMBERS_ERROR: &str = "Could not load project members.";
const UPDATE_MEMBER_ERROR: &str = "Could not update the member.";
const REMOVE_MEMBER_ERROR: &str = "Could not remove the member.";
const SEARCH_ERROR: &str = "Could not search users.";

/// Keys that may carry a status id in the array form of the catalog
const STATUS_ID_KEYS: [&str; 5] = ["id", "code", "value", "statusId", "status"];

/// Keys that may carry a status label in the array form of the catalog
const STATUS_LABEL_KEYS: [&str; 5] = ["name", "nombre", "label", "descripcion", "statusDesc"];

pub struct ProjectsStore {
    api: ApiClient,
    pub owned: Vec<Project>,
    pub collaborations: Vec<Project>,
    pub current: Option<Project>,
    pub statuses: BTreeMap<i64, String>,
    pub members: Vec<ProjectMember>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProjectsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            owned: Vec::new(),
            collaborations: Vec::new(),
            current: None,
            statuses: BTreeMap::new(),
            members: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Load the status catalog. Failures are logged only; labels fall back
    /// to the placeholder.
    pub async fn load_statuses(&mut self) {
        match self.api.fetch_project_statuses().await {
            Ok(raw) => {
                self.statuses = parse_status_catalog(&raw);
                debug!(count = self.statuses.len(), "Project statuses loaded");
            }
            Err(e) => warn!(error = %e, "Failed to load project statuses"),
        }
    }

    pub fn status_label(&self, status_id: Option<i64>) -> &str {
        status_id
            .and_then(|id| self.statuses.get(&id))
            .map(|s| s.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub async fn load_all(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.fetch_projects().await {
            Ok(list) => {
                debug!(owned = list.owned.len(), collaborations = list.collaborations.len(), "Projects loaded");
                self.owned = list.owned;
                self.collaborations = list.collaborations;
            }
            Err(e) => {
                self.error = Some(failure_message("load_all", &e, LOAD_ALL_ERROR));
                self.owned.clear();
                self.collaborations.clear();
            }
        }

        self.loading = false;
    }

    pub async fn load_one(&mut self, project_id: &str) {
        self.loading = true;
        self.error = None;

        match self.api.fetch_project(project_id).await {
            Ok(project) => self.current = Some(project),
            Err(e) => {
                self.error = Some(failure_message("load_one", &e, LOAD_ONE_ERROR));
                self.current = None;
            }
        }

        self.loading = false;
    }

    pub async fn create(&mut self, project: &NewProject) {
        self.error = None;
        match self.api.create_project(project).await {
            Ok(()) => self.load_all().await,
            Err(e) => self.error = Some(failure_message("create", &e, CREATE_ERROR)),
        }
    }

    pub async fn update(&mut self, project_id: &str, update: &ProjectUpdate) {
        self.error = None;
        match self.api.update_project(project_id, update).await {
            Ok(()) => self.load_one(project_id).await,
            Err(e) => self.error = Some(failure_message("update", &e, UPDATE_ERROR)),
        }
    }

    pub async fn remove(&mut self, project_id: &str) {
        self.error = None;
        match self.api.delete_project(project_id).await {
            Ok(()) => {
                if self.current.as_ref().is_some_and(|p| p.id == project_id) {
                    self.current = None;
                }
                self.load_all().await;
            }
            Err(e) => self.error = Some(failure_message("remove", &e, REMOVE_ERROR)),
        }
    }

    pub async fn load_members(&mut self, project_id: &str) {
        self.error = None;
        match self.api.fetch_members(project_id).await {
            Ok(members) => self.members = members,
            Err(e) => self.error = Some(failure_message("load_members", &e, MEMBERS_ERROR)),
        }
    }

    /// Change a member's role, then refresh the member list. Returns what
    /// the API answered with.
    pub async fn update_member(
        &mut self,
        project_id: &str,
        user_id: i64,
        update: &MemberUpdate,
    ) -> Option<Value> {
        self.error = None;
        match self.api.update_member(project_id, user_id, update).await {
            Ok(response) => {
                self.load_members(project_id).await;
                Some(response)
            }
            Err(e) => {
                self.error = Some(failure_message("update_member", &e, UPDATE_MEMBER_ERROR));
                None
            }
        }
    }

    pub async fn remove_member(&mut self, project_id: &str, user_id: i64) {
        self.error = None;
        match self.api.remove_member(project_id, user_id).await {
            Ok(()) => self.load_members(project_id).await,
            Err(e) => self.error = Some(failure_message("remove_member", &e, REMOVE_MEMBER_ERROR)),
        }
    }

    /// Users matching `term` that could be invited to `project_id`.
    pub async fn search_users(&mut self, term: &str, project_id: &str) -> Vec<UserSummary> {
        self.error = None;
        match self.api.search_users(term, project_id).await {
            Ok(hits) => hits,
            Err(e) => {
                self.error = Some(failure_message("search_users", &e, SEARCH_ERROR));
                Vec::new()
            }
        }
    }

    pub fn reset(&mut self) {
        self.owned.clear();
        self.collaborations.clear();
        self.current = None;
        self.members.clear();
        self.loading = false;
        self.error = None;
    }
}

/// Accepts `{"1": "Active"}` or `[{"id": 1, "name": "Active"}, ...]`.
pub fn parse_status_catalog(raw: &Value) -> BTreeMap<i64, String> {
    let mut map = BTreeMap::new();

    match raw {
        Value::Object(entries) => {
            for (key, value) in entries {
                if let Ok(id) = key.trim().parse::<i64>() {
                    map.insert(id, display_value(value));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                let id = STATUS_ID_KEYS
                    .iter()
                    .filter_map(|k| item.get(*k))
                    .find(|v| !v.is_null())
                    .and_then(numeric_id);
                let label = STATUS_LABEL_KEYS
                    .iter()
                    .filter_map(|k| item.get(*k))
                    .find(|v| !v.is_null())
                    .map(display_value)
                    .unwrap_or_else(|| display_value(item));
                if let Some(id) = id {
                    map.insert(id, label);
                }
            }
        }
        _ => {}
    }

    map
}

fn numeric_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
