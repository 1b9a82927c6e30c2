//! Project commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use taskdeck_core::models::{MemberUpdate, NewProject, Project, ProjectRole, ProjectUpdate};
use taskdeck_core::navigation::Route;
use taskdeck_core::stores::ProjectsStore;
use taskdeck_core::AppContext;

use super::{check, enter};
use crate::output;

#[derive(Args, Debug)]
pub struct ProjectsCommand {
    #[command(subcommand)]
    pub command: ProjectsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsSubcommand {
    /// List owned projects and collaborations
    List,

    /// Show one project with its tasks
    Show { project_id: String },

    /// Create a project
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Status id from `projects statuses`
        #[arg(long, default_value_t = 1)]
        status: i64,
    },

    /// Update a project's name, description or status
    Update {
        project_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<i64>,
    },

    /// Delete a project
    Delete { project_id: String },

    /// List a project's members
    Members { project_id: String },

    /// Remove a member from a project
    RemoveMember { project_id: String, user_id: i64 },

    /// Change a member's role
    UpdateMember {
        project_id: String,
        user_id: i64,
        /// OWNER, EDITOR or VIEWER
        #[arg(long)]
        role: ProjectRole,
    },

    /// Find users to invite to a project
    SearchUsers {
        project_id: String,
        term: String,
    },

    /// List the project status catalog
    Statuses,
}

pub async fn handle(context: &mut AppContext, cmd: ProjectsCommand, json: bool) -> Result<()> {
    match cmd.command {
        ProjectsSubcommand::List => {
            enter(context, Route::Projects)?;
            let store = &mut context.projects;
            store.load_statuses().await;
            store.load_all().await;
            check(&store.error)?;
            if json {
                return output::json_pretty(&serde_json::json!({
                    "owned": store.owned,
                    "collaborations": store.collaborations,
                }));
            }
            print_list(store, "Owned", &store.owned);
            println!();
            print_list(store, "Collaborations", &store.collaborations);
            Ok(())
        }
        ProjectsSubcommand::Show { project_id } => {
            enter(context, project_route(&project_id))?;
            let store = &mut context.projects;
            store.load_statuses().await;
            store.load_one(&project_id).await;
            check(&store.error)?;
            let Some(project) = store.current.as_ref() else {
                bail!("Project {} not found", project_id);
            };
            if json {
                return output::json_pretty(project);
            }
            print_project(store, project);
            Ok(())
        }
        ProjectsSubcommand::Create {
            name,
            description,
            status,
        } => {
            enter(context, Route::Projects)?;
            let project = NewProject {
                name,
                description,
                status,
            };
            context.projects.create(&project).await;
            check(&context.projects.error)?;
            output::success(&format!("Created project {}", project.name));
            Ok(())
        }
        ProjectsSubcommand::Update {
            project_id,
            name,
            description,
            status,
        } => {
            if name.is_none() && description.is_none() && status.is_none() {
                bail!("Nothing to update; pass --name, --description or --status");
            }
            enter(context, project_route(&project_id))?;
            let update = ProjectUpdate {
                name,
                description,
                status,
            };
            context.projects.update(&project_id, &update).await;
            check(&context.projects.error)?;
            output::success(&format!("Updated project {}", project_id));
            Ok(())
        }
        ProjectsSubcommand::Delete { project_id } => {
            enter(context, project_route(&project_id))?;
            context.projects.remove(&project_id).await;
            check(&context.projects.error)?;
            output::success(&format!("Deleted project {}", project_id));
            Ok(())
        }
        ProjectsSubcommand::Members { project_id } => {
            enter(context, project_route(&project_id))?;
            context.projects.load_members(&project_id).await;
            check(&context.projects.error)?;
            let members = &context.projects.members;
            if json {
                return output::json_pretty(members);
            }
            output::heading(&format!("Members of {}", project_id));
            for member in members {
                let role = member.role.map(|r| r.to_string()).unwrap_or_default();
                println!("  {:<8} {:<32} {}", member.user_id, member.display_name(), role);
            }
            Ok(())
        }
        ProjectsSubcommand::RemoveMember { project_id, user_id } => {
            enter(context, project_route(&project_id))?;
            context.projects.remove_member(&project_id, user_id).await;
            check(&context.projects.error)?;
            output::success(&format!("Removed user {} from {}", user_id, project_id));
            Ok(())
        }
        ProjectsSubcommand::UpdateMember {
            project_id,
            user_id,
            role,
        } => {
            enter(context, project_route(&project_id))?;
            let response = context
                .projects
                .update_member(&project_id, user_id, &MemberUpdate { role })
                .await;
            check(&context.projects.error)?;
            if json {
                return output::json_pretty(&response);
            }
            output::success(&format!("User {} is now {}", user_id, role));
            Ok(())
        }
        ProjectsSubcommand::SearchUsers { project_id, term } => {
            enter(context, project_route(&project_id))?;
            let hits = context.projects.search_users(&term, &project_id).await;
            check(&context.projects.error)?;
            if json {
                return output::json_pretty(&hits);
            }
            for hit in &hits {
                println!(
                    "  {:<8} {:<24} {}",
                    hit.id,
                    hit.username.as_deref().unwrap_or("-"),
                    hit.email.as_deref().unwrap_or("-")
                );
            }
            if hits.is_empty() {
                println!("No users match '{}'", term);
            }
            Ok(())
        }
        ProjectsSubcommand::Statuses => {
            enter(context, Route::Projects)?;
            context.projects.load_statuses().await;
            let statuses = &context.projects.statuses;
            if json {
                return output::json_pretty(statuses);
            }
            for (id, label) in statuses {
                println!("  {:<4} {}", id, label);
            }
            Ok(())
        }
    }
}

fn project_route(project_id: &str) -> Route {
    Route::ProjectDetail {
        project_id: project_id.to_string(),
    }
}

fn print_list(store: &ProjectsStore, title: &str, projects: &[Project]) {
    output::heading(title);
    if projects.is_empty() {
        println!("  (none)");
    }
    for project in projects {
        println!(
            "  {:<38} {:<32} {:<12} {} tasks",
            project.id,
            project.name,
            store.status_label(project.status),
            project.task_count()
        );
    }
}

fn print_project(store: &ProjectsStore, project: &Project) {
    output::heading(&project.name);
    output::field("Id", &project.id);
    output::field("Status", store.status_label(project.status));
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        output::field("Description", description);
    }
    let tasks = project.tasks.as_deref().unwrap_or_default();
    println!();
    println!("Tasks ({}):", tasks.len());
    for task in tasks {
        println!(
            "  {:<38} {:<32} due {}",
            task.id,
            task.title,
            task.due_date.as_deref().unwrap_or("-")
        );
    }
}
