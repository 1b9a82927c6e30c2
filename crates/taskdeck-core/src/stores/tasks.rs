use tracing::{debug, info};

use crate::api::ApiClient;
use crate::models::{NewTask, TaskPriority, TaskStatus};

use super::{failure_message, UNKNOWN_LABEL};

const CATALOGS_ERROR: &str = "Could not load task catalogs.";
const CREATE_ERROR: &str = "Could not create the task.";
const ASSIGN_ERROR: &str = "The task was created but could not be assigned.";

pub struct TasksStore {
    api: ApiClient,
    pub priorities: Vec<TaskPriority>,
    pub statuses: Vec<TaskStatus>,
    pub loading_catalogs: bool,
    pub error: Option<String>,
}

impl TasksStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            priorities: Vec::new(),
            statuses: Vec::new(),
            loading_catalogs: false,
            error: None,
        }
    }

    /// Fetch both catalogs at once. Neither list changes unless both
    /// requests succeed.
    pub async fn load_catalogs(&mut self) {
        self.loading_catalogs = true;
        self.error = None;

        let result = tokio::try_join!(self.api.fetch_task_priorities(), self.api.fetch_task_statuses());
        match result {
            Ok((priorities, statuses)) => {
                debug!(priorities = priorities.len(), statuses = statuses.len(), "Task catalogs loaded");
                self.priorities = priorities;
                self.statuses = statuses;
            }
            Err(e) => self.error = Some(failure_message("load_catalogs", &e, CATALOGS_ERROR)),
        }

        self.loading_catalogs = false;
    }

    pub fn priority_label(&self, id: Option<i64>) -> &str {
        id.and_then(|id| self.priorities.iter().find(|p| p.id == id))
            .map(|p| p.label.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn status_label(&self, id: Option<i64>) -> &str {
        id.and_then(|id| self.statuses.iter().find(|s| s.id == id))
            .map(|s| s.label.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Create a task and, when it names an assignee, assign it.
    ///
    /// Returns the new task id once the task exists, even if the follow-up
    /// assignment failed; `error` says so in that case.
    pub async fn create_task(&mut self, task: &NewTask) -> Option<String> {
        self.error = None;

        let created = match self.api.create_task(task).await {
            Ok(created) => created,
            Err(e) => {
                self.error = Some(failure_message("create_task", &e, CREATE_ERROR));
                return None;
            }
        };
        info!(task_id = %created.id, project_id = %task.project_id, "Task created");

        if let Some(assignee) = task.assignee_id {
            match self.api.assign_task(&created.id, &[assignee]).await {
                Ok(()) => debug!(task_id = %created.id, assignee, "Task assigned"),
                Err(e) => self.error = Some(failure_message("assign_task", &e, ASSIGN_ERROR)),
            }
        }

        Some(created.id)
    }

    pub fn reset(&mut self) {
        self.priorities.clear();
        self.statuses.clear();
        self.loading_catalogs = false;
        self.error = None;
    }
}
