use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::api::{ApiClient, ApiError};
use crate::models::{InvitationQuery, InvitationView, NewInvitation, PageMeta};

use super::failure_message;

/// Invitation status id for an accepted invitation
pub const INVITATION_ACCEPTED: i64 = 4;

/// Invitation status id for a rejected invitation
pub const INVITATION_REJECTED: i64 = 5;

const STATUSES_ERROR: &str = "Could not load the invitation status catalog.";
const LIST_ERROR: &str = "Could not load your invitations.";
const SEND_ERROR: &str = "Could not send the invitation.";
const CONFIRM_ERROR: &str = "Could not confirm the invitation.";

pub struct InvitationsStore {
    api: ApiClient,
    pub statuses: BTreeMap<i64, String>,
    pub invitations: Vec<InvitationView>,
    pub page_meta: Option<PageMeta>,
    pub loading: bool,
    pub error: Option<String>,
}

impl InvitationsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            statuses: BTreeMap::new(),
            invitations: Vec::new(),
            page_meta: None,
            loading: false,
            error: None,
        }
    }

    pub async fn fetch_statuses(&mut self) {
        self.error = None;
        match self.api.fetch_invitation_statuses().await {
            Ok(statuses) => self.statuses = statuses,
            Err(e) => self.error = Some(failure_message("fetch_statuses", &e, STATUSES_ERROR)),
        }
    }

    pub async fn fetch_my_invitations(&mut self, query: &InvitationQuery) {
        self.loading = true;
        self.error = None;

        match self.api.fetch_invitations(query).await {
            Ok(page) => {
                let (invitations, meta) = page.into_parts();
                debug!(count = invitations.len(), page = meta.number, "Invitations loaded");
                self.invitations = invitations;
                self.page_meta = Some(meta);
            }
            Err(e) => self.error = Some(failure_message("fetch_my_invitations", &e, LIST_ERROR)),
        }

        self.loading = false;
    }

    /// Invite a user to a project the caller owns. The error is recorded
    /// and also returned.
    pub async fn invite_user_to_project(&mut self, invitation: &NewInvitation) -> Result<(), ApiError> {
        self.error = None;
        match self.api.send_invitation(invitation).await {
            Ok(_) => {
                info!(project_id = %invitation.project_id, guest = invitation.guest_user_id, "Invitation sent");
                Ok(())
            }
            Err(e) => {
                self.error = Some(failure_message("invite_user_to_project", &e, SEND_ERROR));
                Err(e)
            }
        }
    }

    pub async fn accept_invitation(&mut self, invitation_id: &str) -> Result<(), ApiError> {
        self.confirm_invitation(invitation_id, INVITATION_ACCEPTED).await
    }

    pub async fn reject_invitation(&mut self, invitation_id: &str) -> Result<(), ApiError> {
        self.confirm_invitation(invitation_id, INVITATION_REJECTED).await
    }

    /// Answer an invitation, then reload the pending list. The error is
    /// recorded and also returned.
    pub async fn confirm_invitation(&mut self, invitation_id: &str, status: i64) -> Result<(), ApiError> {
        self.error = None;
        match self.api.confirm_invitation(invitation_id, status).await {
            Ok(()) => {
                info!(invitation_id = invitation_id, status, "Invitation answered");
                self.fetch_my_invitations(&InvitationQuery::pending()).await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(failure_message("confirm_invitation", &e, CONFIRM_ERROR));
                Err(e)
            }
        }
    }

    pub fn status_label(&self, status: i64) -> Option<&str> {
        self.statuses.get(&status).map(|s| s.as_str())
    }

    pub fn reset(&mut self) {
        self.invitations.clear();
        self.page_meta = None;
        self.loading = false;
        self.error = None;
    }
}
