//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::invitations::InvitationsCommand;
use crate::commands::projects::ProjectsCommand;
use crate::commands::tasks::TasksCommand;

/// Client for the taskdeck project and task API.
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to a daily file in this directory instead of stderr
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// API base URL, overriding config and TASKDECK_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        /// Username or email; defaults to the last one used
        #[arg(long)]
        identifier: Option<String>,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show whether a session is active and when it expires
    Status,

    /// Navigate to an app path and print where the guard lets you land
    Open {
        /// e.g. /projects or /projects/<id>
        path: String,
    },

    /// Project and task counters for the signed-in user
    Dashboard,

    /// Projects and their members
    Projects(ProjectsCommand),

    /// Task catalogs and task creation
    Tasks(TasksCommand),

    /// Project invitations
    Invitations(InvitationsCommand),

    /// Show the signed-in user's profile
    Me,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::invitations::InvitationsSubcommand;
    use crate::commands::projects::ProjectsSubcommand;
    use clap::CommandFactory;
    use taskdeck_core::models::ProjectRole;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_member() {
        let cli = Cli::try_parse_from([
            "taskdeck", "-vv", "projects", "update-member", "p-1", "12", "--role", "editor",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Projects(cmd) => match cmd.command {
                ProjectsSubcommand::UpdateMember { project_id, user_id, role } => {
                    assert_eq!(project_id, "p-1");
                    assert_eq!(user_id, 12);
                    assert_eq!(role, ProjectRole::Editor);
                }
                other => panic!("unexpected subcommand: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invitation_list_defaults() {
        let cli = Cli::try_parse_from(["taskdeck", "invitations", "list", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Invitations(cmd) => match cmd.command {
                InvitationsSubcommand::List { status, page, page_size } => {
                    assert_eq!(status, "PENDIENTE");
                    assert_eq!(page, 0);
                    assert_eq!(page_size, 5);
                }
                other => panic!("unexpected subcommand: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_role() {
        assert!(Cli::try_parse_from(["taskdeck", "invitations", "send", "p-1", "12", "--role", "admin"]).is_err());
    }
}
