use serde::{Deserialize, Serialize};

/// Record status sent with newly created tasks
const ACTIVE_STATUS: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TaskPriority {
    pub id: i64,
    #[serde(rename = "prioridadTipo")]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TaskStatus {
    pub id: i64,
    #[serde(rename = "status")]
    pub label: String,
}

/// A task to create, optionally assigned to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority_id: i64,
    pub status_id: i64,
    pub project_id: String,
    /// `YYYY-MM-DD` or a full local datetime
    pub due_date: Option<String>,
    pub assignee_id: Option<i64>,
}

/// Wire body of `POST /tareas`; the assignee goes to a separate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct TaskCreateRequest<'a> {
    #[serde(rename = "titulo")]
    title: &'a str,
    #[serde(rename = "descripcion")]
    description: &'a str,
    #[serde(rename = "id_prioridad")]
    priority_id: i64,
    #[serde(rename = "id_tarea_status")]
    status_id: i64,
    project_id: &'a str,
    #[serde(rename = "fechaLimite")]
    due_date: Option<String>,
    status: i64,
}

impl NewTask {
    pub(crate) fn request(&self) -> TaskCreateRequest<'_> {
        TaskCreateRequest {
            title: &self.title,
            description: &self.description,
            priority_id: self.priority_id,
            status_id: self.status_id,
            project_id: &self.project_id,
            due_date: self.due_date.as_deref().map(normalize_due_date),
            status: ACTIVE_STATUS,
        }
    }
}

/// Widen a bare date to midnight; anything else passes through.
pub fn normalize_due_date(date: &str) -> String {
    if date.len() == 10 {
        format!("{}T00:00:00", date)
    } else {
        date.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskCreated {
    #[serde(rename = "idGuid")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(due_date: Option<&str>) -> NewTask {
        NewTask {
            title: "Write copy".to_string(),
            description: "Landing page".to_string(),
            priority_id: 2,
            status_id: 1,
            project_id: "p-1".to_string(),
            due_date: due_date.map(str::to_string),
            assignee_id: Some(9),
        }
    }

    #[test]
    fn test_request_body_drops_assignee() {
        let task = new_task(Some("2026-11-01"));
        let body = serde_json::to_value(task.request()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "titulo": "Write copy",
                "descripcion": "Landing page",
                "id_prioridad": 2,
                "id_tarea_status": 1,
                "project_id": "p-1",
                "fechaLimite": "2026-11-01T00:00:00",
                "status": 1
            })
        );
    }

    #[test]
    fn test_due_date_normalization() {
        assert_eq!(normalize_due_date("2026-11-01"), "2026-11-01T00:00:00");
        assert_eq!(normalize_due_date("2026-11-01T17:30:00"), "2026-11-01T17:30:00");

        let body = serde_json::to_value(new_task(None).request()).unwrap();
        assert!(body["fechaLimite"].is_null());
    }

    #[test]
    fn test_parse_catalogs() {
        let priorities: Vec<TaskPriority> =
            serde_json::from_str(r#"[{"id":1,"prioridadTipo":"ALTA"},{"id":2,"prioridadTipo":"BAJA"}]"#).unwrap();
        assert_eq!(priorities[1].label, "BAJA");

        let statuses: Vec<TaskStatus> = serde_json::from_str(r#"[{"id":3,"status":"HECHA"}]"#).unwrap();
        assert_eq!(statuses[0].label, "HECHA");
    }
}
