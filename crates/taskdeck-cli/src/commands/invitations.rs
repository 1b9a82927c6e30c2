//! Invitation commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use taskdeck_core::models::{InvitationQuery, NewInvitation, ProjectRole};
use taskdeck_core::navigation::Route;
use taskdeck_core::AppContext;

use super::{check, enter};
use crate::output;

#[derive(Args, Debug)]
pub struct InvitationsCommand {
    #[command(subcommand)]
    pub command: InvitationsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum InvitationsSubcommand {
    /// List invitations addressed to you
    List {
        /// Status filter
        #[arg(long, default_value = InvitationQuery::PENDING)]
        status: String,
        /// Zero-based page
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 5)]
        page_size: u32,
    },

    /// List the invitation status catalog
    Statuses,

    /// Invite a user to a project you own
    Send {
        project_id: String,
        user_id: i64,
        /// OWNER, EDITOR or VIEWER
        #[arg(long, default_value = "VIEWER")]
        role: ProjectRole,
    },

    /// Accept an invitation
    Accept { invitation_id: String },

    /// Reject an invitation
    Reject { invitation_id: String },
}

pub async fn handle(context: &mut AppContext, cmd: InvitationsCommand, json: bool) -> Result<()> {
    enter(context, Route::Invitations)?;

    match cmd.command {
        InvitationsSubcommand::List {
            status,
            page,
            page_size,
        } => {
            let query = InvitationQuery {
                status,
                page,
                page_size,
                ..InvitationQuery::default()
            };
            let store = &mut context.invitations;
            store.fetch_my_invitations(&query).await;
            check(&store.error)?;
            if json {
                return output::json_pretty(&store.invitations);
            }
            if store.invitations.is_empty() {
                println!("No invitations");
            }
            for invitation in &store.invitations {
                println!(
                    "  {:<38} {:<24} from {:<16} as {}",
                    invitation.id, invitation.project, invitation.host_username, invitation.role
                );
            }
            if let Some(meta) = store.page_meta {
                println!();
                println!("{} ({} total)", meta.display(), meta.total_elements);
            }
            Ok(())
        }
        InvitationsSubcommand::Statuses => {
            context.invitations.fetch_statuses().await;
            check(&context.invitations.error)?;
            let statuses = &context.invitations.statuses;
            if json {
                return output::json_pretty(statuses);
            }
            for (id, label) in statuses {
                println!("  {:<4} {}", id, label);
            }
            Ok(())
        }
        InvitationsSubcommand::Send {
            project_id,
            user_id,
            role,
        } => {
            let invitation = NewInvitation {
                project_id,
                guest_user_id: user_id,
                role,
            };
            context.invitations.invite_user_to_project(&invitation).await?;
            output::success(&format!("Invited user {} as {}", user_id, role));
            Ok(())
        }
        InvitationsSubcommand::Accept { invitation_id } => {
            context.invitations.accept_invitation(&invitation_id).await?;
            output::success(&format!("Accepted invitation {}", invitation_id));
            Ok(())
        }
        InvitationsSubcommand::Reject { invitation_id } => {
            context.invitations.reject_invitation(&invitation_id).await?;
            output::success(&format!("Rejected invitation {}", invitation_id));
            Ok(())
        }
    }
}
