use tracing::debug;

use crate::api::ApiClient;
use crate::models::DashboardSummary;

use super::failure_message;

const LOAD_ERROR: &str = "Could not load the project summary.";

pub struct DashboardStore {
    api: ApiClient,
    pub summary: Option<DashboardSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            summary: None,
            loading: false,
            error: None,
        }
    }

    pub async fn load_summary(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.fetch_dashboard_summary().await {
            Ok(summary) => {
                debug!(user_id = summary.user_id, "Dashboard summary loaded");
                self.summary = Some(summary);
            }
            Err(e) => self.error = Some(failure_message("load_summary", &e, LOAD_ERROR)),
        }

        self.loading = false;
    }

    /// Forget everything cached for the previous session.
    pub fn reset(&mut self) {
        self.summary = None;
        self.loading = false;
        self.error = None;
    }
}
