//! API client for the taskdeck REST API.
//!
//! All requests go through one private `send` path: it attaches the bearer
//! token when there is one and, on a 401, clears the session and sends the
//! router back to login before handing the error to the caller.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::CredentialStore;
use crate::models::{
    DashboardSummary, InvitationQuery, InvitationView, MemberUpdate, NewInvitation, NewProject,
    NewTask, Page, Project, ProjectList, ProjectMember, ProjectUpdate, TaskCreated, TaskPriority,
    TaskStatus, UserProfile, UserSummary,
};
use crate::navigation::{Route, Router};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL used when configuration does not name one
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/ExampleAPI/v1";

#[derive(Serialize)]
struct LoginRequest<'a> {
    data: &'a str,
    password: &'a str,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub jwt: Option<String>,
}

/// API client for the taskdeck service.
/// Clone is cheap - reqwest::Client and the shared state are behind Arcs.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<CredentialStore>,
    router: Arc<Router>,
}

impl ApiClient {
    /// Create a client reading its token from `credentials` and sending
    /// `router` to login when the API rejects the session.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        credentials: Arc<CredentialStore>,
        router: Arc<Router>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            router,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Attach the current token, if any. Expiry is the server's call here.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.token() {
            Some(credential) => builder.bearer_auth(credential.as_str()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let (client, request) = self.authorize(builder).build_split();
        let request = request?;
        let method = request.method().clone();
        let url = request.url().to_string();

        debug!(%method, url = %url, "Sending request");
        let response = client.execute(request).await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status, &body);
        if error.is_unauthorized() {
            self.on_unauthorized(&url);
        } else {
            debug!(%method, url = %url, status = status.as_u16(), "Request failed");
        }
        Err(error)
    }

    fn on_unauthorized(&self, url: &str) {
        warn!(url = url, "API rejected the session, signing out");
        self.credentials.logout();
        if let Err(e) = self.router.replace(Route::Login) {
            warn!(error = %e, "Failed to navigate to login");
        }
    }

    /// Parse a JSON body; an empty body reads as `null`.
    async fn read_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text)
            .map_err(|e| ApiError::InvalidResponse(format!("{} from {}", e, url)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::read_json(response, path).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Self::read_json(response, path).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(method, path).json(body)).await?;
        Self::read_json(response, path).await
    }

    /// Send without a body and ignore whatever comes back.
    async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.send(self.request(method, path)).await?;
        Ok(())
    }

    /// Send a JSON body and ignore whatever comes back.
    async fn send_json_ignoring_response<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(self.request(method, path).json(body)).await?;
        Ok(())
    }

    // ===== Authentication =====

    pub async fn login(&self, identifier: &str, secret: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            data: identifier,
            password: secret,
        };
        let response: Option<LoginResponse> = self.send_json(Method::POST, "/auth/login", &body).await?;
        Ok(response.unwrap_or(LoginResponse { jwt: None }))
    }

    // ===== Dashboard =====

    pub async fn fetch_dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.get("/projects/summary").await
    }

    // ===== Projects =====

    /// Status catalog, left raw: the API has shipped both an object and an
    /// array shape for it.
    pub async fn fetch_project_statuses(&self) -> Result<serde_json::Value, ApiError> {
        self.get("/projects/statuses").await
    }

    pub async fn fetch_projects(&self) -> Result<ProjectList, ApiError> {
        self.get("/projects").await
    }

    pub async fn fetch_project(&self, project_id: &str) -> Result<Project, ApiError> {
        self.get(&format!("/projects/{}", project_id)).await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<(), ApiError> {
        self.send_json_ignoring_response(Method::POST, "/projects", project).await
    }

    pub async fn update_project(&self, project_id: &str, update: &ProjectUpdate) -> Result<(), ApiError> {
        let path = format!("/projects/{}", project_id);
        self.send_json_ignoring_response(Method::PUT, &path, update).await
    }

    pub async fn delete_project(&self, project_id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/projects/{}", project_id)).await
    }

    pub async fn fetch_members(&self, project_id: &str) -> Result<Vec<ProjectMember>, ApiError> {
        let members: Option<Vec<ProjectMember>> =
            self.get(&format!("/projects/{}/members", project_id)).await?;
        Ok(members.unwrap_or_default())
    }

    pub async fn update_member(
        &self,
        project_id: &str,
        user_id: i64,
        update: &MemberUpdate,
    ) -> Result<serde_json::Value, ApiError> {
        let path = format!("/projects/{}/members/{}", project_id, user_id);
        self.send_json(Method::PATCH, &path, update).await
    }

    pub async fn remove_member(&self, project_id: &str, user_id: i64) -> Result<(), ApiError> {
        let path = format!("/projects/{}/members/{}", project_id, user_id);
        self.send_empty(Method::DELETE, &path).await
    }

    pub async fn search_users(&self, term: &str, project_id: &str) -> Result<Vec<UserSummary>, ApiError> {
        let hits: Option<Vec<UserSummary>> = self
            .get_with_query(
                "/usuario/search/by-username-or-email",
                &[("term", term), ("projectId", project_id)],
            )
            .await?;
        Ok(hits.unwrap_or_default())
    }

    // ===== Tasks =====

    pub async fn fetch_task_priorities(&self) -> Result<Vec<TaskPriority>, ApiError> {
        self.get("/tareas/prioridades").await
    }

    pub async fn fetch_task_statuses(&self) -> Result<Vec<TaskStatus>, ApiError> {
        self.get("/tareas/tarea-status").await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<TaskCreated, ApiError> {
        self.send_json(Method::POST, "/tareas", &task.request()).await
    }

    pub async fn assign_task(&self, task_id: &str, user_ids: &[i64]) -> Result<(), ApiError> {
        let path = format!("/tareas/{}/assign", task_id);
        self.send_json_ignoring_response(Method::POST, &path, user_ids).await
    }

    // ===== Invitations =====

    pub async fn fetch_invitation_statuses(&self) -> Result<BTreeMap<i64, String>, ApiError> {
        let statuses: Option<BTreeMap<i64, String>> = self.get("/invitations/statuses").await?;
        Ok(statuses.unwrap_or_default())
    }

    pub async fn fetch_invitations(&self, query: &InvitationQuery) -> Result<Page<InvitationView>, ApiError> {
        self.get_with_query("/invitations", &query.params()).await
    }

    pub async fn send_invitation(&self, invitation: &NewInvitation) -> Result<serde_json::Value, ApiError> {
        self.send_json(Method::POST, "/invitations", invitation).await
    }

    pub async fn confirm_invitation(&self, invitation_id: &str, status: i64) -> Result<(), ApiError> {
        self.send_empty(Method::PATCH, &format!("/invitations/{}/{}", invitation_id, status))
            .await
    }

    // ===== User =====

    pub async fn fetch_me(&self) -> Result<UserProfile, ApiError> {
        self.get("/usuario/me").await
    }
}
