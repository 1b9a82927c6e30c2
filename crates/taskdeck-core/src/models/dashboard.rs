use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Counters behind the dashboard, computed server-side for the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DashboardSummary {
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    pub username: String,
    #[serde(rename = "proyectosTotalActivos")]
    pub active_projects: i64,
    #[serde(rename = "proyectosComoOwner")]
    pub owned_projects: i64,
    #[serde(rename = "tareasPendientes")]
    pub pending_tasks: i64,
    #[serde(rename = "tareasVencidas")]
    pub overdue_tasks: i64,
    #[serde(rename = "tareasParaHoy")]
    pub tasks_due_today: i64,
    /// Priority label -> open task count
    #[serde(rename = "tareasPorPrioridad", default)]
    pub tasks_by_priority: BTreeMap<String, i64>,
    /// Status label -> task count
    #[serde(rename = "tareasPorEstatus", default)]
    pub tasks_by_status: BTreeMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary() {
        let json = r#"{"usuarioId":7,"username":"ana","proyectosTotalActivos":3,"proyectosComoOwner":1,"tareasPendientes":12,"tareasVencidas":2,"tareasParaHoy":4,"tareasPorPrioridad":{"ALTA":5,"BAJA":7},"tareasPorEstatus":{"EN_PROGRESO":3}}"#;
        let summary: DashboardSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.user_id, 7);
        assert_eq!(summary.overdue_tasks, 2);
        assert_eq!(summary.tasks_by_priority.get("ALTA"), Some(&5));
        assert_eq!(summary.tasks_by_status.len(), 1);
    }
}
